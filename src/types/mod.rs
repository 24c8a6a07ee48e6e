mod candidate;
mod team;
mod user;

pub use candidate::Candidate;
pub use team::{Team, TeamStatus, TeamSummary, NO_SUBJECT};
pub use user::User;
