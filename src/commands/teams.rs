use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::TeamCreateArgs;
use crate::commands::Context;
use crate::directory;
use crate::error::{AppError, Result};
use crate::output;
use crate::selection::SelectionState;
use crate::status::get_my_team;
use crate::submission::{Route, Submitted, TeamSubmitter};
use crate::types::{Candidate, TeamSummary};

/// One line typed at the interactive picker.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Submit,
    Quit,
    Reload,
    Help,
    Search(String),
    Rename(String),
    Toggle(i64),
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Submit;
    }
    if let Some(term) = line.strip_prefix('/') {
        return Input::Search(term.trim().to_string());
    }
    if let Some(name) = line.strip_prefix("name ") {
        return Input::Rename(name.trim().to_string());
    }
    match line {
        "q" | "quit" => Input::Quit,
        "reload" => Input::Reload,
        "?" | "help" => Input::Help,
        _ => line
            .parse()
            .map(Input::Toggle)
            .unwrap_or_else(|_| Input::Unknown(line.to_string())),
    }
}

const PICKER_HELP: &str = "  <id>         select or deselect a classmate
  /<text>      filter by name or email (/ alone clears)
  name <text>  set the team name
  reload       fetch the roster again
  <enter>      create the team
  q            quit without creating";

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "")]
    mark: &'static str,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

fn pick_rows(state: &SelectionState, roster: &[Candidate]) -> Vec<PickRow> {
    state
        .visible_candidates(roster)
        .into_iter()
        .map(|c| PickRow {
            mark: if state.is_selected(c.id) {
                "[x]"
            } else if state.is_selectable(c.id) {
                "[ ]"
            } else {
                " - "
            },
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
        })
        .collect()
}

fn print_summary(summary: &TeamSummary) {
    println!("{}", summary.name.bold());
    println!("{} - {} members", summary.subject, summary.members);
    println!("{}", summary.status.colored());
}

/// Show the caller's team, or the empty state with a hint to create one.
pub async fn status(ctx: &Context) -> Result<()> {
    match get_my_team(&ctx.client, &ctx.session, &ctx.cancel).await? {
        Some(team) => {
            let summary = TeamSummary::from(&team);
            output::print_item(&summary, print_summary);
        }
        None => {
            if output::is_json_output() {
                println!("null");
            } else {
                println!("You don't have a team yet.");
                println!("Run 'inno team create' to form one.");
            }
        }
    }

    Ok(())
}

pub async fn create(ctx: &Context, args: TeamCreateArgs) -> Result<()> {
    // Creation is only offered to users without a team.
    if let Some(team) = get_my_team(&ctx.client, &ctx.session, &ctx.cancel).await? {
        return Err(AppError::AlreadyInTeam(team.name));
    }

    let mut state = SelectionState::new(ctx.config.capacity);
    if let Some(name) = args.name {
        state.set_team_name(name);
    }
    for id in args.members {
        if state.is_selected(id) {
            continue;
        }
        if !state.toggle(id) {
            output::print_warning(&format!(
                "ignoring classmate {id}: at most {} can be selected",
                state.capacity()
            ));
        }
    }

    let submitter = TeamSubmitter::new(&ctx.client);
    let submitted = if args.interactive {
        match pick(ctx, &submitter, &mut state).await? {
            Some(submitted) => submitted,
            None => {
                output::print_message("Aborted.");
                return Ok(());
            }
        }
    } else {
        submitter
            .submit_selection(&ctx.session, &mut state, &ctx.cancel)
            .await?
    };

    output::print_message(&format!("Created team '{}'", submitted.team.name));

    match submitted.next {
        Route::TeamListing => status(ctx).await,
    }
}

async fn load_roster(ctx: &Context) -> Result<Vec<Candidate>> {
    let roster = directory::list_candidates(&ctx.client, &ctx.session, &ctx.cancel).await?;
    Ok(directory::without_self(
        roster,
        ctx.session.identity_claim().as_deref(),
    ))
}

fn warn_dropped(dropped: &[i64]) {
    if !dropped.is_empty() {
        let ids: Vec<String> = dropped.iter().map(i64::to_string).collect();
        output::print_warning(&format!(
            "removed classmates no longer available: {}",
            ids.join(", ")
        ));
    }
}

/// Interactive picker. Returns `None` when the user quits.
/// A failed submission keeps the draft so the user can fix it and retry.
async fn pick(
    ctx: &Context,
    submitter: &TeamSubmitter<'_>,
    state: &mut SelectionState,
) -> Result<Option<Submitted>> {
    let mut roster = load_roster(ctx).await?;
    warn_dropped(&state.reconcile(&roster));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("{PICKER_HELP}");

    loop {
        let rows = pick_rows(state, &roster);
        if rows.is_empty() {
            eprintln!("No students match '{}'", state.search_term());
        } else {
            eprintln!("{}", Table::new(rows).with(Style::rounded()).to_string());
        }

        let name = if state.team_name().is_empty() {
            "<unnamed>".dimmed().to_string()
        } else {
            state.team_name().bold().to_string()
        };
        eprint!(
            "{name} [{} selected, {} left] > ",
            state.selected().len(),
            state.remaining()
        );

        let line = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return Err(AppError::Cancelled),
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            return Ok(None);
        };

        match parse_input(&line) {
            Input::Submit => {
                match submitter
                    .submit_selection(&ctx.session, state, &ctx.cancel)
                    .await
                {
                    Ok(submitted) => return Ok(Some(submitted)),
                    Err(e @ (AppError::Auth(_) | AppError::Cancelled)) => return Err(e),
                    Err(e) => output::print_warning(&e.to_string()),
                }
            }
            Input::Quit => return Ok(None),
            Input::Help => eprintln!("{PICKER_HELP}"),
            Input::Search(term) => state.set_search_term(term),
            Input::Rename(name) => state.set_team_name(name),
            Input::Reload => match load_roster(ctx).await {
                Ok(fresh) => {
                    roster = fresh;
                    warn_dropped(&state.reconcile(&roster));
                }
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => output::print_warning(&e.to_string()),
            },
            Input::Toggle(id) => {
                if !state.toggle(id) {
                    output::print_warning(&format!(
                        "at most {} classmates can be selected; deselect one first",
                        state.capacity()
                    ));
                }
            }
            Input::Unknown(text) => {
                output::print_warning(&format!("unrecognised input '{text}' (type ? for help)"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(""), Input::Submit);
        assert_eq!(parse_input("  \n"), Input::Submit);
        assert_eq!(parse_input("q"), Input::Quit);
        assert_eq!(parse_input("reload"), Input::Reload);
        assert_eq!(parse_input("?"), Input::Help);
        assert_eq!(parse_input("/Ruiz "), Input::Search("Ruiz".into()));
        assert_eq!(parse_input("/"), Input::Search(String::new()));
        assert_eq!(parse_input("name  Team X "), Input::Rename("Team X".into()));
        assert_eq!(parse_input("12"), Input::Toggle(12));
        assert_eq!(parse_input("twelve"), Input::Unknown("twelve".into()));
    }

    #[test]
    fn test_pick_rows_marks() {
        let roster = vec![
            Candidate::new(1, "A", "a@x"),
            Candidate::new(2, "B", "b@x"),
            Candidate::new(3, "C", "c@y"),
        ];
        let mut state = SelectionState::new(1);
        state.toggle(1);

        let marks: Vec<(i64, &str)> = pick_rows(&state, &roster)
            .iter()
            .map(|r| (r.id, r.mark))
            .collect();
        assert_eq!(marks, vec![(1, "[x]"), (2, " - "), (3, " - ")]);

        state.set_search_term("@Y");
        state.toggle(1);
        let marks: Vec<(i64, &str)> = pick_rows(&state, &roster)
            .iter()
            .map(|r| (r.id, r.mark))
            .collect();
        assert_eq!(marks, vec![(3, "[ ]")]);
    }
}
