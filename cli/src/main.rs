use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use sendinblue::mail::render_payload;
use sendinblue::{ApiVersion, Mailer, MailerConfig, SendinblueMailer};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

mod message;

use message::MessageFile;

#[derive(Parser)]
#[command(name = "sendinblue", about = "Render or send Sendinblue transactional emails")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON payload a message would be sent as
    Render {
        #[arg(value_name = "message.json")]
        message: PathBuf,

        #[arg(long = "api-version")]
        api_version: Option<ApiVersion>,
    },
    /// Send a message through the provider API
    Send {
        #[arg(value_name = "message.json")]
        message: PathBuf,

        #[arg(long = "api-version")]
        api_version: Option<ApiVersion>,

        #[arg(long = "base-uri")]
        base_uri: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("initializing logger")?;

    match cli.command {
        Commands::Render {
            message,
            api_version,
        } => {
            let email = load_email(&message)?;
            let payload = render_payload(&email, api_version.unwrap_or_default())?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::Send {
            message,
            api_version,
            base_uri,
        } => {
            let mut config = MailerConfig::from_env()?;
            if let Some(api_version) = api_version {
                config = config.api_version(api_version);
            }
            if let Some(base_uri) = base_uri {
                config = config.base_uri(base_uri);
            }
            log::debug!(
                "sending via {} ({})",
                config.base_uri,
                config.api_version
            );

            let email = load_email(&message)?;
            let response = SendinblueMailer::from_config(config)
                .send(&email)
                .await
                .with_context(|| format!("sending {}", message.display()))?;

            log::info!("Accepted with status {}", response.status);
            log::trace!("{}", response.body);
            println!("{}", response.body);
        }
    }
    Ok(())
}

fn load_email(path: &Path) -> Result<sendinblue::Email> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    log::debug!("loading message from {}", path.display());
    MessageFile::load(path)?.into_email(base)
}
