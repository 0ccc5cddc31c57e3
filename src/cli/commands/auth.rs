use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_config, save_config};
use crate::cli::utils::{client_from_config, output_error, output_success, report_client_error, resolve_password};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account and sign in")]
    Register {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Login to the configured server")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout (discard the stored token)")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information from the server")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register { email, password } => {
            let password = resolve_password(password)?;
            let mut config = load_config()?;
            let client = client_from_config(&config);

            match client.register(&email, &password).await {
                Ok(session) => {
                    config.record_session(session.token, session.user.email.clone());
                    save_config(&config)?;
                    output_success(
                        &output_format,
                        &format!("Registered and logged in as {}", session.user.email),
                        Some(json!({ "user": { "id": session.user.id, "email": session.user.email } })),
                    )
                }
                Err(e) => {
                    report_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        AuthCommands::Login { email, password } => {
            let password = resolve_password(password)?;
            let mut config = load_config()?;
            let client = client_from_config(&config);

            match client.login(&email, &password).await {
                Ok(session) => {
                    config.record_session(session.token, session.user.email.clone());
                    save_config(&config)?;
                    output_success(
                        &output_format,
                        &format!("Logged in as {}", session.user.email),
                        Some(json!({
                            "user": { "id": session.user.id, "email": session.user.email },
                            "expires_in": session.expires_in,
                        })),
                    )
                }
                Err(e) => {
                    report_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        AuthCommands::Logout => {
            let mut config = load_config()?;
            config.clear_session();
            save_config(&config)?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let config = load_config()?;
            match (&config.token, &config.email) {
                (Some(_), Some(email)) => output_success(
                    &output_format,
                    &format!("Logged in as {} against {}", email, config.server_url),
                    Some(json!({
                        "email": email,
                        "server_url": config.server_url,
                        "logged_in_at": config.logged_in_at,
                    })),
                ),
                _ => {
                    output_error(&output_format, "Not logged in", None)?;
                    std::process::exit(1);
                }
            }
        }
        AuthCommands::Whoami => {
            let config = load_config()?;
            let client = client_from_config(&config);

            match client.whoami().await {
                Ok(data) => output_success(
                    &output_format,
                    &format!("{} ({})", data.user.email, data.user.id),
                    Some(json!({ "user": data.user, "profile": data.profile })),
                ),
                Err(e) => {
                    report_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
    }
}
