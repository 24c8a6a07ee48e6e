use serde::{Deserialize, Serialize};

/// A classmate eligible for team membership.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Candidate {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Case-insensitive substring match on name or email.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}
