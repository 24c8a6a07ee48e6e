use chrono::Local;
use serde::Serialize;

use crate::auth::{self, Registration};
use crate::cli::{LoginArgs, RegisterArgs};
use crate::commands::{teams, Context};
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct Identity {
    email: Option<String>,
    expires_at: Option<String>,
}

/// Use the password given on the command line, or read it from the
/// terminal without echo.
fn password_or_prompt(given: Option<String>) -> Result<String> {
    match given {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

/// Log in, then show the team listing like the web client does.
pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let password = password_or_prompt(args.password)?;

    auth::login(&ctx.client, &ctx.session, &args.email, &password, &ctx.cancel).await?;

    let who = ctx.session.identity_claim().unwrap_or(args.email);
    output::print_message(&format!("Logged in as {who}"));

    teams::status(ctx).await
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.session.clear()?;
    output::print_message("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let Some(credential) = ctx.session.credential() else {
        output::print_message("Not logged in");
        return Ok(());
    };

    let claims = credential.claims().unwrap_or_default();
    let identity = Identity {
        expires_at: claims
            .expires_at()
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
        email: claims.sub,
    };

    output::print_item(&identity, |id| {
        match &id.email {
            Some(email) => println!("{email}"),
            None => println!("Logged in (identity unavailable)"),
        }
        if let Some(expires) = &id.expires_at {
            println!("Token expires {expires}");
        }
    });

    Ok(())
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let registration = Registration {
        name: args.name,
        identity_document: args.document,
        email: args.email,
        password: args.password,
        role_id: args.role_id,
        course_id: args.course_id,
    };

    let user = auth::register(&ctx.client, &registration, &ctx.cancel).await?;

    output::print_item(&user, |u| {
        println!("Created account #{} for {} <{}>", u.id, u.name, u.email);
        println!("Run 'inno login --email {}' to continue", u.email);
    });

    Ok(())
}
