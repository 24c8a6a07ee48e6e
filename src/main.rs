mod auth;
mod cli;
mod client;
mod commands;
mod config;
mod directory;
mod error;
mod logging;
mod output;
mod responses;
mod selection;
mod session;
mod status;
mod submission;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands, TeamCommands};
use client::ApiClient;
use commands::Context;
use config::Config;
use error::Result;
use session::{Credential, FileStore, MemoryStore, Session};
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        tracing::debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn open_session() -> Result<Session> {
    match std::env::var("INNO_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(Session::new(MemoryStore::with(Credential::new(token)))),
        _ => Ok(Session::new(FileStore::default_location()?)),
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "inno", &mut io::stdout());
        }
        Commands::Init => {
            logging::init("warn", cli.verbose);
            commands::init::run()?;
        }
        // Commands that talk to the backend
        command => {
            let config = Config::load()?;
            logging::init(&config.log, cli.verbose);

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::debug!("interrupted, cancelling in-flight request");
                    on_interrupt.cancel();
                }
            });

            let ctx = Context {
                client: ApiClient::new(&config.host, config.timeout())?,
                session: open_session()?,
                config,
                cancel,
            };

            match command {
                Commands::Login(args) => {
                    commands::account::login(&ctx, args).await?;
                }
                Commands::Logout => {
                    commands::account::logout(&ctx)?;
                }
                Commands::Whoami => {
                    commands::account::whoami(&ctx)?;
                }
                Commands::Register(args) => {
                    commands::account::register(&ctx, args).await?;
                }
                Commands::Students { search } => {
                    commands::students::list(&ctx, search).await?;
                }
                Commands::Teams => {
                    commands::teams::status(&ctx).await?;
                }
                Commands::Team { action } => match action {
                    TeamCommands::Status => {
                        commands::teams::status(&ctx).await?;
                    }
                    TeamCommands::Create(args) => {
                        commands::teams::create(&ctx, args).await?;
                    }
                },
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
