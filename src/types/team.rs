use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

pub const NO_SUBJECT: &str = "N/A";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub creator_email: Option<String>,
    #[serde(default)]
    pub current_members: u32,
    #[serde(default)]
    pub available_spots: Option<u32>,
    #[serde(default, alias = "memberDetails")]
    pub current_members_details: Vec<MemberDetail>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    Complete,
    Incomplete,
}

impl TeamStatus {
    pub fn label(self) -> &'static str {
        match self {
            TeamStatus::Complete => "complete",
            TeamStatus::Incomplete => "incomplete",
        }
    }

    pub fn colored(self) -> String {
        match self {
            TeamStatus::Complete => self.label().green().bold().to_string(),
            TeamStatus::Incomplete => self.label().yellow().to_string(),
        }
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Display-ready view of a team record.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub name: String,
    pub subject: String,
    pub members: u32,
    pub status: TeamStatus,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        let subject = team
            .current_members_details
            .first()
            .and_then(|m| m.course_name.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| NO_SUBJECT.to_string());

        // An unknown spot count is not a full team.
        let status = if team.available_spots == Some(0) {
            TeamStatus::Complete
        } else {
            TeamStatus::Incomplete
        };

        Self {
            name: team.name.clone(),
            subject,
            members: team.current_members,
            status,
        }
    }
}
