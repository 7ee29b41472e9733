use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use futureme::connector::adapter::{load_env_file, DEFAULT_ENV_FILE, DEFAULT_MAJORS_FILE};
use futureme::connector::api::{ChatController, Container, ContainerConfig, Router};
use futureme::{BackendClient, Commands, LlmConfig};

#[derive(Parser)]
#[command(name = "futureme")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file mapping major names to descriptions
    #[arg(long, global = true, default_value = DEFAULT_MAJORS_FILE)]
    majors_file: PathBuf,

    /// JSON file replacing the built-in keyword rules
    #[arg(long, global = true)]
    rules_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so `env = ...` arguments see values from the file too.
    let env_file = load_env_file(Path::new(DEFAULT_ENV_FILE));
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match env_file {
        Ok(true) => debug!("Loaded environment from {DEFAULT_ENV_FILE}"),
        Ok(false) => {}
        Err(e) => warn!("Ignoring malformed env file {e}"),
    }

    if let Commands::Chat {
        backend_url,
        timeout,
    } = &cli.command
    {
        let backend = BackendClient::new(backend_url.clone(), Duration::from_secs(*timeout));
        let controller = ChatController::new(backend);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let summary = controller.run(stdin, tokio::io::stdout()).await?;
        println!("{summary}");
        return Ok(());
    }

    let container = Container::new(ContainerConfig {
        majors_file: cli.majors_file,
        rules_file: cli.rules_file,
        llm: LlmConfig::from_env(),
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn ask_requires_a_message() {
        assert!(Cli::try_parse_from(["futureme", "ask"]).is_err());
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::try_parse_from(["futureme", "ask", "I", "like", "art"]).unwrap();
        match cli.command {
            Commands::Ask { message, explain } => {
                assert_eq!(message.join(" "), "I like art");
                assert!(!explain);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["futureme", "serve"]).unwrap();
        assert_eq!(cli.majors_file, PathBuf::from("data/majors.json"));
        match cli.command {
            Commands::Serve {
                port,
                request_timeout,
                ..
            } => {
                assert_eq!(port, 8000);
                assert_eq!(request_timeout, 120);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn chat_defaults_to_local_backend() {
        let cli = Cli::try_parse_from(["futureme", "chat"]).unwrap();
        match cli.command {
            Commands::Chat { backend_url, timeout } => {
                if std::env::var_os("BACKEND_URL").is_none() {
                    assert_eq!(backend_url, futureme::connector::adapter::DEFAULT_BACKEND_URL);
                }
                assert_eq!(timeout, 60);
            }
            _ => panic!("expected chat"),
        }
    }
}
