use serde::{Deserialize, Serialize};

use super::Candidate;

/// User record as returned by the directory and registration endpoints.
/// Fields beyond these are ignored.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for Candidate {
    fn from(user: User) -> Self {
        Candidate::new(user.id, user.name, user.email)
    }
}
