use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::cli::OutputFormat;
use crate::client::{ApiClient, ClientError};
use crate::database::models::Aluno;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    field_errors: Option<&std::collections::HashMap<String, String>>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(errors) = field_errors {
                response["field_errors"] = json!(errors);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            if let Some(errors) = field_errors {
                for (field, msg) in errors {
                    eprintln!("  {}: {}", field, msg);
                }
            }
        }
    }
    Ok(())
}

/// Render a set of alunos in the appropriate format
pub fn output_alunos(output_format: &OutputFormat, alunos: &[&Aluno]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "alunos": alunos }))?);
        }
        OutputFormat::Text => {
            if alunos.is_empty() {
                println!("No alunos found");
                return Ok(());
            }
            for aluno in alunos {
                println!(
                    "{}  {:<30}  {:<30}  {}",
                    aluno.id, aluno.nome, aluno.email, aluno.data_nascimento
                );
            }
        }
    }
    Ok(())
}

/// Build an API client from the persisted CLI config.
pub fn client_from_config(config: &crate::cli::config::CliConfig) -> ApiClient {
    ApiClient::new(config.server_url.clone()).with_token(config.token.clone())
}

/// Resolve a password from the flag or an interactive prompt.
pub fn resolve_password(provided: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }

    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Report a façade error through the standard output helpers.
pub fn report_client_error(output_format: &OutputFormat, err: &ClientError) -> anyhow::Result<()> {
    match err {
        ClientError::Validation { message, field_errors } => {
            output_error(output_format, message, Some(field_errors))
        }
        other => output_error(output_format, &other.to_string(), None),
    }
}
