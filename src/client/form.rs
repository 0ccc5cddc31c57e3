//! The aluno record form as a validation state machine.
//!
//! The form holds raw text fields and only yields a typed submission payload
//! through [`AlunoForm::begin_submit`], which refuses closed, in-flight, and
//! invalid states. That makes "no request is issued on validation failure"
//! structural rather than a convention: without a [`FormSubmission`] there is
//! nothing to send.

use std::collections::HashMap;
use uuid::Uuid;

use crate::database::models::{Aluno, NewAluno};
use crate::validate::{validate_data_nascimento, validate_email, validate_nome};

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormState {
    Closed,
    OpenForCreate,
    OpenForEdit(Uuid),
    SubmittingCreate,
    SubmittingEdit(Uuid),
}

/// What a valid submission is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Edit(Uuid),
}

/// A validated payload, obtainable only from `begin_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub target: SubmitTarget,
    pub aluno: NewAluno,
}

/// Why `begin_submit` refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// The form is not open.
    Closed,
    /// A previous submission has not resolved yet.
    InFlight,
    /// Field validation failed; see `errors()`.
    Invalid,
}

pub struct AlunoForm {
    state: FormState,
    pub nome: String,
    pub email: String,
    pub data_nascimento: String,
    errors: HashMap<String, String>,
    submit_error: Option<String>,
}

impl AlunoForm {
    pub fn new() -> Self {
        Self {
            state: FormState::Closed,
            nome: String::new(),
            email: String::new(),
            data_nascimento: String::new(),
            errors: HashMap::new(),
            submit_error: None,
        }
    }

    pub fn open_for_create(&mut self) {
        self.state = FormState::OpenForCreate;
        self.nome.clear();
        self.email.clear();
        self.data_nascimento.clear();
        self.errors.clear();
        self.submit_error = None;
    }

    /// Open pre-populated from an existing record.
    pub fn open_for_edit(&mut self, aluno: &Aluno) {
        self.state = FormState::OpenForEdit(aluno.id);
        self.nome = aluno.nome.clone();
        self.email = aluno.email.clone();
        self.data_nascimento = aluno.data_nascimento.to_string();
        self.errors.clear();
        self.submit_error = None;
    }

    pub fn close(&mut self) {
        self.state = FormState::Closed;
        self.errors.clear();
        self.submit_error = None;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::SubmittingCreate | FormState::SubmittingEdit(_))
    }

    /// One message per invalid field, populated by `validate`/`begin_submit`.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The failure surfaced by the last resolved submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Run field validation, recording one error per invalid field.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();

        if let Some(msg) = validate_nome(&self.nome) {
            self.errors.insert("nome".to_string(), msg);
        }
        if let Some(msg) = validate_email(&self.email) {
            self.errors.insert("email".to_string(), msg);
        }
        if let Err(msg) = validate_data_nascimento(&self.data_nascimento) {
            self.errors.insert("data_nascimento".to_string(), msg);
        }

        self.errors.is_empty()
    }

    /// Validate and, if clean, move to the submitting state and hand back the
    /// payload. While submitting, further calls return `InFlight` until the
    /// outstanding request resolves.
    pub fn begin_submit(&mut self) -> Result<FormSubmission, SubmitBlocked> {
        let target = match self.state {
            FormState::Closed => return Err(SubmitBlocked::Closed),
            FormState::SubmittingCreate | FormState::SubmittingEdit(_) => {
                return Err(SubmitBlocked::InFlight)
            }
            FormState::OpenForCreate => SubmitTarget::Create,
            FormState::OpenForEdit(id) => SubmitTarget::Edit(id),
        };

        if !self.validate() {
            return Err(SubmitBlocked::Invalid);
        }

        // Validation just passed, so the parse cannot fail here
        let data_nascimento = validate_data_nascimento(&self.data_nascimento)
            .map_err(|_| SubmitBlocked::Invalid)?;

        self.state = match target {
            SubmitTarget::Create => FormState::SubmittingCreate,
            SubmitTarget::Edit(id) => FormState::SubmittingEdit(id),
        };
        self.submit_error = None;

        Ok(FormSubmission {
            target,
            aluno: NewAluno {
                nome: self.nome.trim().to_string(),
                email: self.email.trim().to_string(),
                data_nascimento,
            },
        })
    }

    /// The outstanding request succeeded: the form closes and resets.
    pub fn resolve_success(&mut self) {
        if self.is_submitting() {
            self.state = FormState::Closed;
            self.nome.clear();
            self.email.clear();
            self.data_nascimento.clear();
            self.errors.clear();
            self.submit_error = None;
        }
    }

    /// The outstanding request failed: the form stays open with the error
    /// surfaced, ready for another attempt.
    pub fn resolve_failure(&mut self, message: impl Into<String>) {
        match self.state {
            FormState::SubmittingCreate => self.state = FormState::OpenForCreate,
            FormState::SubmittingEdit(id) => self.state = FormState::OpenForEdit(id),
            _ => return,
        }
        self.submit_error = Some(message.into());
    }
}

impl Default for AlunoForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn filled_form() -> AlunoForm {
        let mut form = AlunoForm::new();
        form.open_for_create();
        form.nome = "Ana".to_string();
        form.email = "ana@example.com".to_string();
        form.data_nascimento = "2000-01-15".to_string();
        form
    }

    #[test]
    fn empty_name_blocks_submission_with_field_error() {
        let mut form = filled_form();
        form.nome = String::new();

        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Invalid));
        assert!(form.errors().contains_key("nome"));
        assert!(form.is_open());
        assert!(!form.is_submitting());
    }

    #[test]
    fn invalid_email_blocks_submission() {
        let mut form = filled_form();
        form.email = "not-an-email".to_string();

        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Invalid));
        assert!(form.errors().contains_key("email"));
    }

    #[test]
    fn missing_birth_date_blocks_submission() {
        let mut form = filled_form();
        form.data_nascimento = String::new();

        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Invalid));
        assert!(form.errors().contains_key("data_nascimento"));
    }

    #[test]
    fn closed_form_cannot_submit() {
        let mut form = AlunoForm::new();
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Closed));
    }

    #[test]
    fn valid_submission_yields_payload_and_disables_resubmit() {
        let mut form = filled_form();

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.target, SubmitTarget::Create);
        assert_eq!(submission.aluno.nome, "Ana");
        assert!(form.is_submitting());

        // Single-flight: a second submit is rejected until resolution
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn success_closes_the_form() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.resolve_success();

        assert!(!form.is_open());
        assert!(form.nome.is_empty());
        assert!(form.submit_error().is_none());
    }

    #[test]
    fn failure_reopens_with_error_surfaced() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.resolve_failure("Email already in use by another aluno: ana@example.com");

        assert!(form.is_open());
        assert!(!form.is_submitting());
        assert!(form.submit_error().unwrap().contains("already in use"));

        // Fields survive so the user can correct and retry
        assert_eq!(form.nome, "Ana");
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn edit_form_prefills_and_targets_the_record() {
        let aluno = Aluno {
            id: uuid::Uuid::new_v4(),
            nome: "Bruno".to_string(),
            email: "bruno@example.com".to_string(),
            data_nascimento: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            created_by: uuid::Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut form = AlunoForm::new();
        form.open_for_edit(&aluno);
        assert_eq!(form.nome, "Bruno");
        assert_eq!(form.data_nascimento, "1999-12-31");

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.target, SubmitTarget::Edit(aluno.id));
    }
}
