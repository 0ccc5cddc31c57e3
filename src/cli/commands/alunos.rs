use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::config::load_config;
use crate::cli::utils::{client_from_config, output_alunos, output_error, output_success, report_client_error};
use crate::cli::OutputFormat;
use crate::client::form::{AlunoForm, SubmitBlocked, SubmitTarget};
use crate::client::roster::Roster;
use crate::client::{ApiClient, ClientError};

#[derive(Subcommand)]
pub enum AlunoCommands {
    #[command(about = "List your alunos, optionally filtered")]
    List {
        #[arg(long, help = "Case-insensitive substring match over nome or email")]
        search: Option<String>,
    },

    #[command(about = "Create a new aluno")]
    Create {
        #[arg(long, help = "Student name")]
        nome: String,
        #[arg(long, help = "Student email")]
        email: String,
        #[arg(long, help = "Birth date (AAAA-MM-DD)")]
        nascimento: String,
    },

    #[command(about = "Update an aluno you own")]
    Update {
        #[arg(help = "Record ID")]
        id: Uuid,
        #[arg(long, help = "New name")]
        nome: Option<String>,
        #[arg(long, help = "New email")]
        email: Option<String>,
        #[arg(long, help = "New birth date (AAAA-MM-DD)")]
        nascimento: Option<String>,
    },

    #[command(about = "Delete an aluno you own")]
    Delete {
        #[arg(help = "Record ID")]
        id: Uuid,
    },
}

pub async fn handle(cmd: AlunoCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config);

    match cmd {
        AlunoCommands::List { search } => {
            let mut roster = Roster::new();
            if let Err(e) = roster.refresh(&client).await {
                report_client_error(&output_format, &e)?;
                std::process::exit(1);
            }
            if let Some(term) = search {
                roster.set_search(term);
            }
            output_alunos(&output_format, &roster.visible())
        }
        AlunoCommands::Create { nome, email, nascimento } => {
            let mut form = AlunoForm::new();
            form.open_for_create();
            form.nome = nome;
            form.email = email;
            form.data_nascimento = nascimento;

            submit_form(&mut form, &client, &output_format).await
        }
        AlunoCommands::Update { id, nome, email, nascimento } => {
            // PUT replaces all three fields, so fetch the current record and
            // merge in whatever flags were provided
            let mut roster = Roster::new();
            if let Err(e) = roster.refresh(&client).await {
                report_client_error(&output_format, &e)?;
                std::process::exit(1);
            }
            let Some(current) = roster.all().iter().find(|a| a.id == id).cloned() else {
                output_error(&output_format, &format!("Aluno {} not found in your roster", id), None)?;
                std::process::exit(1);
            };

            let mut form = AlunoForm::new();
            form.open_for_edit(&current);
            if let Some(nome) = nome {
                form.nome = nome;
            }
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(nascimento) = nascimento {
                form.data_nascimento = nascimento;
            }

            submit_form(&mut form, &client, &output_format).await
        }
        AlunoCommands::Delete { id } => match client.delete_aluno(id).await {
            Ok(()) => output_success(
                &output_format,
                &format!("Aluno {} deleted", id),
                Some(json!({ "deleted": id })),
            ),
            Err(e) => {
                report_client_error(&output_format, &e)?;
                std::process::exit(1);
            }
        },
    }
}

/// Drive a form through one submission round: validate, send, resolve.
async fn submit_form(
    form: &mut AlunoForm,
    client: &ApiClient,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let submission = match form.begin_submit() {
        Ok(submission) => submission,
        Err(SubmitBlocked::Invalid) => {
            output_error(output_format, "Invalid aluno fields", Some(form.errors()))?;
            std::process::exit(1);
        }
        Err(blocked) => {
            output_error(output_format, &format!("Form not ready to submit: {:?}", blocked), None)?;
            std::process::exit(1);
        }
    };

    let result: Result<_, ClientError> = match submission.target {
        SubmitTarget::Create => client.create_aluno(&submission.aluno).await,
        SubmitTarget::Edit(id) => client.update_aluno(id, &submission.aluno).await,
    };

    match result {
        Ok(aluno) => {
            form.resolve_success();
            output_success(
                output_format,
                &format!("Saved aluno {} ({})", aluno.nome, aluno.id),
                Some(json!({ "aluno": aluno })),
            )
        }
        Err(e) => {
            form.resolve_failure(e.to_string());
            report_client_error(output_format, &e)?;
            std::process::exit(1);
        }
    }
}
