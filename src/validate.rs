//! Field-level validation shared by the record form (client side) and the
//! API handlers (server side). Both boundaries apply the same rules, so a
//! payload that passes the form never bounces off the server for shape.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Maximum length of an aluno's name, in characters.
pub const NOME_MAX_LEN: usize = 100;

/// Validate an aluno name: non-empty after trimming, at most 100 characters.
pub fn validate_nome(nome: &str) -> Option<String> {
    let trimmed = nome.trim();
    if trimmed.is_empty() {
        return Some("Nome é obrigatório".to_string());
    }
    if trimmed.chars().count() > NOME_MAX_LEN {
        return Some(format!("Nome deve ter no máximo {} caracteres", NOME_MAX_LEN));
    }
    None
}

/// Validate email syntax: single `@`, non-empty local part, dotted domain.
///
/// This is deliberately a syntax check, not deliverability verification.
pub fn validate_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("Email é obrigatório".to_string());
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if local.is_empty() || domain.is_empty() || !domain_ok || email.contains(char::is_whitespace) {
        return Some("Email inválido".to_string());
    }
    None
}

/// Validate a birth date supplied as text (form input), yielding the parsed
/// date on success. Expected format is ISO `YYYY-MM-DD`.
pub fn validate_data_nascimento(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Data de nascimento é obrigatória".to_string());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| "Data de nascimento inválida (use AAAA-MM-DD)".to_string())
}

/// Validate the already-typed aluno fields as they arrive at the API
/// boundary. The date is parsed by serde before this runs, so only nome and
/// email can still be malformed. Returns one message per invalid field.
pub fn aluno_field_errors(nome: &str, email: &str) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    if let Some(msg) = validate_nome(nome) {
        errors.insert("nome".to_string(), msg);
    }
    if let Some(msg) = validate_email(email) {
        errors.insert("email".to_string(), msg);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nome_required() {
        assert!(validate_nome("").is_some());
        assert!(validate_nome("   ").is_some());
        assert!(validate_nome("Ana").is_none());
    }

    #[test]
    fn nome_max_length() {
        let long = "a".repeat(NOME_MAX_LEN);
        assert!(validate_nome(&long).is_none());
        let too_long = "a".repeat(NOME_MAX_LEN + 1);
        assert!(validate_nome(&too_long).is_some());
    }

    #[test]
    fn email_syntax() {
        assert!(validate_email("").is_some());
        assert!(validate_email("not-an-email").is_some());
        assert!(validate_email("missing@domain").is_some());
        assert!(validate_email("two@@ats.com").is_some());
        assert!(validate_email("has space@mail.com").is_some());
        assert!(validate_email("ana@example.com").is_none());
        assert!(validate_email("a.b-c@sub.example.co").is_none());
    }

    #[test]
    fn data_nascimento_parses_iso() {
        assert!(validate_data_nascimento("").is_err());
        assert!(validate_data_nascimento("15/01/2000").is_err());
        assert!(validate_data_nascimento("2000-02-30").is_err());
        let d = validate_data_nascimento("2000-01-15").unwrap();
        assert_eq!(d.to_string(), "2000-01-15");
    }

    #[test]
    fn field_errors_report_each_field_once() {
        let errors = aluno_field_errors("", "not-an-email");
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("nome"));
        assert!(errors.contains_key("email"));

        let errors = aluno_field_errors("Ana", "ana@example.com");
        assert!(errors.is_empty());
    }
}
