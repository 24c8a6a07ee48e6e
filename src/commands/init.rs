use std::io::{self, Write};

use crate::config::{Config, DEFAULT_CAPACITY, DEFAULT_HOST};
use crate::error::{AppError, Result};

fn ask(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = ask(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("InnoSistemas CLI Configuration");
    println!("==============================\n");

    let mut config = Config::default();

    let host = ask(&format!("Backend host [{DEFAULT_HOST}]: "))?;
    if !host.is_empty() {
        url::Url::parse(&host).map_err(|_| AppError::InvalidUrl(host.clone()))?;
        config.host = host;
    }

    let capacity = ask(&format!(
        "Classmates selectable per team [{DEFAULT_CAPACITY}]: "
    ))?;
    if !capacity.is_empty() {
        config.capacity = capacity.parse().map_err(|_| {
            AppError::Validation(format!("'{capacity}' is not a number"))
        })?;
    }

    let write_err = |e| AppError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let contents = toml::to_string(&config)
        .map_err(|e| AppError::Validation(format!("could not serialise config: {e}")))?;
    std::fs::write(&config_path, contents).map_err(write_err)?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'inno login --email <you>@udea.edu.co' to get started.");

    Ok(())
}
