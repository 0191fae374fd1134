use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod filter_args;
mod output;

use mabi_auction_api::AuctionClient;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::facets::FacetsOptions;
use commands::search::SearchOptions;
use commands::{CommandContext, CommandError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{}", serde_json::to_string_pretty(&error_json).unwrap_or_default());
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

async fn run(cli: Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(&cli);

    match cli.command {
        Commands::Config { ref command } => match command {
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::execute_set(&ctx, key, value)
            }
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Show) | None => commands::config::execute_show(&ctx),
        },

        Commands::Search {
            category,
            keyword,
            limit,
            filters,
        } => {
            let client = build_client(cli.api_key.as_deref())?;
            let opts = SearchOptions {
                category,
                keyword,
                limit,
                filters,
            };
            commands::search::execute(&ctx, &client, &opts).await
        }

        Commands::Facets {
            category,
            keyword,
            limit,
        } => {
            let client = build_client(cli.api_key.as_deref())?;
            let opts = FacetsOptions {
                category,
                keyword,
                limit,
            };
            commands::facets::execute(&ctx, &client, &opts).await
        }
    }
}

/// Builds the API client, resolving the key with priority: flag/env > config.
fn build_client(flag_key: Option<&str>) -> commands::Result<AuctionClient> {
    let config = load_config()?;

    let api_key = flag_key
        .map(str::to_string)
        .or(config.api_key)
        .ok_or_else(|| {
            CommandError::Config(
                "No API key configured (set MABI_API_KEY or run 'mabi config set api_key <KEY>')"
                    .to_string(),
            )
        })?;

    Ok(match config.base_url {
        Some(base_url) => AuctionClient::with_base_url(api_key, base_url),
        None => AuctionClient::new(api_key),
    })
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Api(_) => "API_ERROR",
        CommandError::Metadata(_) => "METADATA_ERROR",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Api(_) => ExitCode::from(2),
        CommandError::Io(_) | CommandError::Metadata(_) => ExitCode::from(3),
        CommandError::Filter(_) | CommandError::Json(_) => ExitCode::from(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // These tests point MABI_CONFIG at their own fixture, and env vars
    // are process-wide state, so they must not run concurrently.
    #[test]
    #[serial]
    fn test_build_client_prefers_flag_key() {
        let original = env::var("MABI_CONFIG").ok();
        env::set_var("MABI_CONFIG", "/tmp/mabi-test-nonexistent/config.toml");

        let result = build_client(Some("flag-key"));

        if let Some(val) = original {
            env::set_var("MABI_CONFIG", val);
        } else {
            env::remove_var("MABI_CONFIG");
        }

        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_build_client_reads_config_file() {
        use std::io::Write;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, r#"api_key = "config-key-1234""#).unwrap();
        writeln!(file, r#"base_url = "http://localhost:9999""#).unwrap();

        let original = env::var("MABI_CONFIG").ok();
        env::set_var("MABI_CONFIG", config_path.to_str().unwrap());

        let result = build_client(None);

        if let Some(val) = original {
            env::set_var("MABI_CONFIG", val);
        } else {
            env::remove_var("MABI_CONFIG");
        }

        let client = result.expect("client should build from config");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    #[serial]
    fn test_build_client_without_key_is_config_error() {
        let original = env::var("MABI_CONFIG").ok();
        env::set_var("MABI_CONFIG", "/tmp/mabi-test-nonexistent/config.toml");

        let result = build_client(None);

        if let Some(val) = original {
            env::set_var("MABI_CONFIG", val);
        } else {
            env::remove_var("MABI_CONFIG");
        }

        match result {
            Err(CommandError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
