use tabled::Tabled;

use crate::commands::Context;
use crate::directory;
use crate::error::Result;
use crate::output::{self, truncate};
use crate::selection::SelectionState;
use crate::types::Candidate;

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&Candidate> for StudentRow {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: truncate(&candidate.name, 40),
            email: candidate.email.clone(),
        }
    }
}

pub async fn list(ctx: &Context, search: Option<String>) -> Result<()> {
    let roster = directory::list_candidates(&ctx.client, &ctx.session, &ctx.cancel).await?;
    let roster = directory::without_self(roster, ctx.session.identity_claim().as_deref());

    let mut state = SelectionState::new(ctx.config.capacity);
    state.set_search_term(search.unwrap_or_default());
    let visible: Vec<Candidate> = state
        .visible_candidates(&roster)
        .into_iter()
        .cloned()
        .collect();

    if visible.is_empty() {
        output::print_message("No students found");
        return Ok(());
    }

    output::print_table(&visible, |c| StudentRow::from(c));

    Ok(())
}
