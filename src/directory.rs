//! Roster of classmates that can be picked for a team.

use tokio_util::sync::CancellationToken;

use crate::client::{self, ApiClient, ServerMessage, LIST_USERS_PATH};
use crate::error::{AppError, Result};
use crate::responses::Page;
use crate::session::Session;
use crate::types::{Candidate, User};

/// Fetch the selectable users as a flat list, in server order.
///
/// One attempt per call; the caller decides whether to try again.
pub async fn list_candidates(
    client: &ApiClient,
    session: &Session,
    cancel: &CancellationToken,
) -> Result<Vec<Candidate>> {
    let credential = session
        .credential()
        .ok_or_else(AppError::missing_credential)?;

    let response = client.get(LIST_USERS_PATH, &credential, cancel).await?;

    if !response.status().is_success() {
        let failure = ServerMessage::read(response).await;
        tracing::warn!(status = failure.status(), "failed to fetch users");
        return Err(AppError::Transport(failure.into_message()));
    }

    let page: Page<User> = client::read_json(response, cancel).await?;
    tracing::debug!(
        count = page.content.len(),
        total = page.total_elements,
        "fetched roster page"
    );

    Ok(page.content.into_iter().map(Candidate::from).collect())
}

/// Drop the caller's own entry; the creator is added to the team server-side.
pub fn without_self(roster: Vec<Candidate>, identity: Option<&str>) -> Vec<Candidate> {
    match identity {
        Some(email) => roster
            .into_iter()
            .filter(|c| !c.email.eq_ignore_ascii_case(email))
            .collect(),
        None => roster,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::session_for;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body() -> serde_json::Value {
        json!({
            "content": [
                {"id": 1, "name": "Ana Ruiz", "email": "ana@udea.edu.co", "role": "STUDENT", "enabled": true},
                {"id": 2, "name": "Bruno Díaz", "email": "bruno@udea.edu.co", "course": null}
            ],
            "pageable": {"pageNumber": 0, "pageSize": 20},
            "totalPages": 1,
            "totalElements": 2,
            "last": true,
            "first": true,
            "empty": false
        })
    }

    #[tokio::test]
    async fn test_list_candidates_flattens_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LIST_USERS_PATH))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let roster = list_candidates(&client, &session_for("me@udea.edu.co"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            roster,
            vec![
                Candidate::new(1, "Ana Ruiz", "ana@udea.edu.co"),
                Candidate::new(2, "Bruno Díaz", "bruno@udea.edu.co"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_candidates_without_credential_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let result = list_candidates(&client, &Session::anonymous(), &CancellationToken::new()).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_list_candidates_structured_error() {
        let server = MockServer::start().await;
        Mock::given(path(LIST_USERS_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = list_candidates(&client, &session_for("a@b"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::Transport(m) if m == "Forbidden"));
        assert_eq!(err.to_string(), "Could not load roster: Forbidden");
    }

    #[tokio::test]
    async fn test_list_candidates_unparseable_error() {
        let server = MockServer::start().await;
        Mock::given(path(LIST_USERS_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = list_candidates(&client, &session_for("a@b"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::Transport(m) if m == "server error at status 503"));
    }

    #[test]
    fn test_without_self() {
        let roster = vec![
            Candidate::new(1, "Me", "ME@udea.edu.co"),
            Candidate::new(2, "Other", "other@udea.edu.co"),
        ];
        let filtered = without_self(roster.clone(), Some("me@udea.edu.co"));
        assert_eq!(filtered, vec![Candidate::new(2, "Other", "other@udea.edu.co")]);
        assert_eq!(without_self(roster.clone(), None), roster);
    }
}
