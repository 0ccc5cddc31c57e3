use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_config, save_config};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Set the API server URL")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:3000")]
        url: String,
    },

    #[command(about = "Show the configured server")]
    Show,

    #[command(about = "Ping the configured server's health endpoint")]
    Ping,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Set { url } => {
            url::Url::parse(&url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;

            let mut config = load_config()?;
            config.server_url = url.trim_end_matches('/').to_string();
            save_config(&config)?;

            output_success(
                &output_format,
                &format!("Server set to {}", config.server_url),
                Some(json!({ "server_url": config.server_url })),
            )
        }
        ServerCommands::Show => {
            let config = load_config()?;
            output_success(
                &output_format,
                &format!("Server: {}", config.server_url),
                Some(json!({ "server_url": config.server_url })),
            )
        }
        ServerCommands::Ping => {
            let config = load_config()?;
            let url = format!("{}/health", config.server_url);

            let client = reqwest::Client::new();
            match client
                .get(&url)
                .timeout(std::time::Duration::from_secs(5))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    output_success(&output_format, &format!("{} is up", config.server_url), None)
                }
                Ok(response) => {
                    output_error(
                        &output_format,
                        &format!("{} responded with {}", config.server_url, response.status()),
                        None,
                    )?;
                    std::process::exit(1);
                }
                Err(e) => {
                    output_error(&output_format, &format!("{} unreachable: {}", config.server_url, e), None)?;
                    std::process::exit(1);
                }
            }
        }
    }
}
