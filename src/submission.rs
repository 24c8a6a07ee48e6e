//! Turns a draft team into a creation request and reconciles the outcome.

use std::cell::Cell;

use tokio_util::sync::CancellationToken;

use crate::client::{self, ApiClient, ServerMessage, TEAMS_PATH};
use crate::error::{AppError, Result};
use crate::responses::CreateTeamRequest;
use crate::selection::{DraftTeam, SelectionState};
use crate::session::Session;
use crate::types::Team;

/// Status assigned to every newly created team.
pub const INITIAL_STATUS_ID: u32 = 1;

/// Where the user should land next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    TeamListing,
}

#[derive(Debug)]
pub struct Submitted {
    pub team: Team,
    pub next: Route,
}

pub struct TeamSubmitter<'a> {
    client: &'a ApiClient,
    in_flight: Cell<bool>,
}

/// Clears the in-flight flag however the submission ends, including when
/// the future is dropped mid-request.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<'a> TeamSubmitter<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            in_flight: Cell::new(false),
        }
    }

    #[cfg(test)]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Validate and send one creation request. Never retries.
    pub async fn submit(
        &self,
        session: &Session,
        draft: &DraftTeam,
        cancel: &CancellationToken,
    ) -> Result<Team> {
        if self.in_flight.replace(true) {
            return Err(AppError::SubmissionInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        let credential = session
            .credential()
            .ok_or_else(AppError::missing_credential)?;

        let name = draft.name.trim();
        if name.is_empty() {
            tracing::debug!("rejecting team without a name");
            return Err(AppError::Validation("team name required".to_string()));
        }

        let body = CreateTeamRequest {
            name,
            status_id: INITIAL_STATUS_ID,
            user_ids: &draft.members,
        };
        let response = self
            .client
            .post(TEAMS_PATH, Some(&credential), &body, cancel)
            .await?;

        if !response.status().is_success() {
            let failure = ServerMessage::read(response).await;
            tracing::warn!(status = failure.status(), "team creation rejected");
            return Err(AppError::Server(failure.into_message()));
        }

        let team: Team = client::read_json(response, cancel).await?;
        tracing::info!(team_id = team.id, name = %team.name, "team created");
        Ok(team)
    }

    /// Submit the current draft. The draft is cleared only on success.
    pub async fn submit_selection(
        &self,
        session: &Session,
        state: &mut SelectionState,
        cancel: &CancellationToken,
    ) -> Result<Submitted> {
        let team = self.submit(session, &state.draft(), cancel).await?;
        state.clear();
        Ok(Submitted {
            team,
            next: Route::TeamListing,
        })
    }
}
