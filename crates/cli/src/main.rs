//! docgen CLI
//!
//! Main entry point for the docgen command-line tool.
//! Drafts documents in a given voice with a hosted AI model and saves them
//! as Markdown or to Google Docs/Drive.

mod commands;
mod console;
mod output;

use clap::{Parser, Subcommand};
use commands::{GenerateArgs, ModelsCommand};
use docgen_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Instrument;

/// docgen - AI-powered document generator (Claude, GPT, Gemini)
#[derive(Parser, Debug)]
#[command(name = "docgen")]
#[command(about = "AI-powered document generator using Claude, GPT and Gemini", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCGEN_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (any non-empty NO_COLOR also disables it)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Model key (run `docgen models` to list them)
    #[arg(short, long, global = true, env = "DOCGEN_MODEL")]
    model: Option<String>,

    /// Maximum tokens requested from the provider
    #[arg(long, global = true, env = "DOCGEN_MAX_TOKENS")]
    max_tokens: Option<u32>,

    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available AI models
    Models(ModelsCommand),
}

fn main() -> ExitCode {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(async {
        tokio::select! {
            result = run(cli) => match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            },
            Ok(()) = tokio::signal::ctrl_c() => {
                println!("\n\nCancelled by user.");
                ExitCode::SUCCESS
            }
        }
    });

    // A pending stdin read would otherwise hold up shutdown
    runtime.shutdown_background();
    code
}

async fn run(cli: Cli) -> AppResult<()> {
    // Load configuration (workspace and config file first, then CLI overrides)
    let config = AppConfig::load_with(cli.workspace, cli.config)?.with_overrides(
        None,
        None,
        cli.model,
        cli.max_tokens,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("docgen starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Model: {}", config.model);

    let command = cli.command;
    let generate = cli.generate;
    let command_name = match &command {
        Some(Commands::Models(_)) => "models",
        None => "generate",
    };

    // Route to command handlers
    let result = async {
        match &command {
            Some(Commands::Models(cmd)) => cmd.execute().await,
            None => generate.execute(&config).await,
        }
    }
    .instrument(tracing::info_span!("command", name = command_name))
    .await;

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generation_flags() {
        let cli = Cli::try_parse_from([
            "docgen",
            "-m",
            "gpt-4o",
            "-t",
            "notes/topic.md",
            "-s",
            "Plain and direct",
            "-a",
            "CTOs",
            "--type",
            "whitepaper",
            "--size",
            "3 pages",
            "-o",
            "docs",
            "--upload-as-file",
            "--max-tokens",
            "4000",
        ])
        .unwrap();

        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.max_tokens, Some(4000));
        assert!(cli.command.is_none());
        assert_eq!(cli.generate.topic.as_deref(), Some("notes/topic.md"));
        assert_eq!(cli.generate.output_type.as_deref(), Some("whitepaper"));
        assert_eq!(cli.generate.output.as_deref(), Some("docs"));
        assert!(cli.generate.upload_as_file);
        assert!(!cli.generate.is_interactive());
    }

    #[test]
    fn test_no_topic_is_interactive() {
        let cli = Cli::try_parse_from(["docgen", "-y"]).unwrap();
        assert!(cli.generate.is_interactive());
        assert!(cli.generate.yes);
    }

    #[test]
    fn test_no_color_env_accepts_any_value() {
        std::env::set_var("NO_COLOR", "1");
        let parsed = Cli::try_parse_from(["docgen", "-t", "x"]);
        std::env::remove_var("NO_COLOR");

        let cli = parsed.unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.generate.topic.as_deref(), Some("x"));
    }

    #[test]
    fn test_models_subcommand() {
        let cli = Cli::try_parse_from(["docgen", "models", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Models(cmd)) => assert!(cmd.json),
            other => panic!("Expected models command, got {:?}", other),
        }
    }
}
