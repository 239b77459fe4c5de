use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "slate",
    about = "Transparent Classroom roster export to Google Sheets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch rosters and publish them to a new shared spreadsheet
    Run {
        /// Trigger event payload (JSON), echoed in the response body
        #[arg(long)]
        event: Option<String>,
        /// Include students and enrollments from past sessions
        #[arg(long)]
        include_inactive: bool,
    },
    /// Test the Transparent Classroom connection
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            event,
            include_inactive,
        } => {
            commands::run::run(event.as_deref(), include_inactive).await?;
        }
        Commands::Check => {
            commands::check::run().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_parse_run_defaults() {
        let cli = Cli::parse_from(["slate", "run"]);
        match cli.command {
            Commands::Run {
                event,
                include_inactive,
            } => {
                assert!(event.is_none());
                assert!(!include_inactive);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parse_run_with_event() {
        let cli = Cli::parse_from(["slate", "run", "--event", r#"{"source":"schedule"}"#]);
        match cli.command {
            Commands::Run { event, .. } => {
                assert_eq!(event.as_deref(), Some(r#"{"source":"schedule"}"#));
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parse_run_include_inactive() {
        let cli = Cli::parse_from(["slate", "run", "--include-inactive"]);
        match cli.command {
            Commands::Run {
                include_inactive, ..
            } => assert!(include_inactive),
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parse_check() {
        let cli = Cli::parse_from(["slate", "check"]);
        assert!(matches!(cli.command, Commands::Check));
    }
}
