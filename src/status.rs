//! Reads the caller's current team, if any.

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::client::{self, ApiClient, ServerMessage, MY_TEAM_PATH};
use crate::error::{AppError, Result};
use crate::session::Session;
use crate::types::Team;

/// `Ok(None)` means the user has no team yet; the server signals that with 404.
pub async fn get_my_team(
    client: &ApiClient,
    session: &Session,
    cancel: &CancellationToken,
) -> Result<Option<Team>> {
    let credential = session
        .credential()
        .ok_or_else(AppError::missing_credential)?;

    let response = client.get(MY_TEAM_PATH, &credential, cancel).await?;

    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => Ok(Some(client::read_json(response, cancel).await?)),
        _ => {
            let failure = ServerMessage::read(response).await;
            tracing::warn!(status = failure.status(), "failed to fetch team");
            Err(AppError::Server(failure.into_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::session_for;
    use crate::types::{TeamStatus, TeamSummary, NO_SUBJECT};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fetch(template: ResponseTemplate) -> Result<Option<Team>> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MY_TEAM_PATH))
            .respond_with(template)
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        get_my_team(&client, &session_for("me@udea.edu.co"), &CancellationToken::new()).await
    }

    #[tokio::test]
    async fn test_not_found_means_no_team() {
        let result = fetch(ResponseTemplate::new(404).set_body_json(json!({"message": "no team"}))).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_server_error_is_error() {
        let result = fetch(ResponseTemplate::new(500)).await;
        assert!(matches!(&result, Err(AppError::Server(m)) if m == "server error at status 500"));
    }

    #[tokio::test]
    async fn test_error_message_verbatim() {
        let result =
            fetch(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expirado"}))).await;
        assert!(matches!(&result, Err(AppError::Server(m)) if m == "Token expirado"));
    }

    #[tokio::test]
    async fn test_team_found_and_summarised() {
        let team = fetch(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "name": "Los Compiladores",
            "creatorEmail": "me@udea.edu.co",
            "currentMembers": 2,
            "availableSpots": 1,
            "currentMembersDetails": [
                {"name": "Me", "email": "me@udea.edu.co", "courseName": "Arquitectura de Software"},
                {"name": "Ana", "email": "ana@udea.edu.co", "courseName": "Otro"}
            ]
        })))
        .await
        .unwrap()
        .unwrap();

        let summary = TeamSummary::from(&team);
        assert_eq!(summary.name, "Los Compiladores");
        assert_eq!(summary.subject, "Arquitectura de Software");
        assert_eq!(summary.members, 2);
        assert_eq!(summary.status, TeamStatus::Incomplete);
    }

    #[tokio::test]
    async fn test_without_credential_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let result = get_my_team(&client, &Session::anonymous(), &CancellationToken::new()).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_summary_complete_without_details() {
        let team: Team = serde_json::from_value(json!({
            "id": 1,
            "name": "Full",
            "currentMembers": 3,
            "availableSpots": 0
        }))
        .unwrap();

        let summary = TeamSummary::from(&team);
        assert_eq!(summary.status, TeamStatus::Complete);
        assert_eq!(summary.subject, NO_SUBJECT);
    }

    #[test]
    fn test_summary_accepts_member_details_alias() {
        let team: Team = serde_json::from_value(json!({
            "id": 1,
            "name": "Alias",
            "currentMembers": 1,
            "availableSpots": 2,
            "memberDetails": [{"courseName": null}]
        }))
        .unwrap();

        assert_eq!(TeamSummary::from(&team).subject, NO_SUBJECT);
    }

    #[test]
    fn test_summary_missing_spots_is_incomplete() {
        let team: Team = serde_json::from_value(json!({
            "id": 1,
            "name": "X",
            "currentMembers": 1
        }))
        .unwrap();

        assert_eq!(team.available_spots, None);
        assert_eq!(TeamSummary::from(&team).status, TeamStatus::Incomplete);
    }

    #[test]
    fn test_summary_blank_course_falls_back() {
        let team: Team = serde_json::from_value(json!({
            "id": 1,
            "name": "X",
            "currentMembers": 1,
            "availableSpots": 1,
            "currentMembersDetails": [{"courseName": ""}, {"courseName": "Otro"}]
        }))
        .unwrap();

        assert_eq!(TeamSummary::from(&team).subject, NO_SUBJECT);
    }
}
