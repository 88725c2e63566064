//! Contact inquiry entity and field validation.
//!
//! The ingestion path only ever hands a [`NewInquiry`] to the store, and a
//! `NewInquiry` only exists after [`validate_contact`] accepted the raw
//! payload, so downstream code never sees an unvalidated shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// A persisted contact-form submission.
///
/// `id` and `fecha` are assigned by the store on creation and never change;
/// records are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactInquiry {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub mensaje: String,
    pub fecha: DateTime<Utc>,
}

/// Untrusted ingestion payload as it arrives on the wire.
///
/// Fields are raw JSON values: clients may omit them entirely or send the
/// wrong type, and the validator reports both as "required" violations.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct RawContactPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nombre: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub mensaje: Option<JsonValue>,
}

impl RawContactPayload {
    pub fn new(nombre: &str, email: &str, mensaje: &str) -> Self {
        Self {
            nombre: Some(JsonValue::from(nombre)),
            email: Some(JsonValue::from(email)),
            mensaje: Some(JsonValue::from(mensaje)),
        }
    }
}

/// A validated, normalized inquiry ready to be appended to a store.
///
/// Fields are trimmed and the email is lower-cased. For untrusted input this
/// must be produced via [`validate_contact`]; the seeder constructs it
/// directly from its compiled-in template pool.
#[derive(Clone, Debug, PartialEq)]
pub struct NewInquiry {
    pub nombre: String,
    pub email: String,
    pub mensaje: String,
}

/// Maximum length of `nombre` after trimming.
pub const MAX_NOMBRE_LEN: usize = 100;
/// Maximum length of `email` after trimming.
pub const MAX_EMAIL_LEN: usize = 255;

/// Checks the `local@domain.tld` shape: no whitespace, exactly one `@` with a
/// non-empty local part, and a `.` inside the domain with non-empty text on
/// both sides.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(l), Some(d)) => (l, d),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + c.len_utf8() < domain.len())
}

fn as_trimmed_str(value: &Option<JsonValue>) -> Option<&str> {
    value.as_ref().and_then(JsonValue::as_str).map(str::trim)
}

/// Validates a raw payload against the contact field rules.
///
/// All violations are collected in rule order, never just the first. The
/// email format check only runs when the presence check passed, so an empty
/// email is not additionally reported as malformed.
pub fn validate_contact(raw: &RawContactPayload) -> Result<NewInquiry, Vec<String>> {
    let mut errors = Vec::new();

    let nombre = as_trimmed_str(&raw.nombre);
    match nombre {
        None | Some("") => errors.push("name is required".to_string()),
        Some(n) if n.chars().count() > MAX_NOMBRE_LEN => {
            errors.push("name exceeds 100 characters".to_string())
        }
        _ => {}
    }

    let email = as_trimmed_str(&raw.email);
    match email {
        None | Some("") => errors.push("email is required".to_string()),
        Some(e) if !is_valid_email(e) => errors.push("invalid email format".to_string()),
        Some(e) if e.chars().count() > MAX_EMAIL_LEN => {
            errors.push("email exceeds 255 characters".to_string())
        }
        _ => {}
    }

    let mensaje = as_trimmed_str(&raw.mensaje);
    if matches!(mensaje, None | Some("")) {
        errors.push("message is required".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Unwraps above are avoided by re-reading the already-checked fields.
    Ok(NewInquiry {
        nombre: nombre.unwrap_or_default().to_string(),
        email: email.unwrap_or_default().to_lowercase(),
        mensaje: mensaje.unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(nombre: &str, email: &str, mensaje: &str) -> RawContactPayload {
        RawContactPayload::new(nombre, email, mensaje)
    }

    #[test]
    fn accepts_a_well_formed_payload() {
        let inquiry = validate_contact(&raw("Ana", "ana@x.com", "hola")).unwrap();
        assert_eq!(inquiry.nombre, "Ana");
        assert_eq!(inquiry.email, "ana@x.com");
        assert_eq!(inquiry.mensaje, "hola");
    }

    #[test]
    fn trims_fields_and_lowercases_email() {
        let inquiry = validate_contact(&raw("  Ana  ", " ANA@X.COM ", " hola ")).unwrap();
        assert_eq!(inquiry.nombre, "Ana");
        assert_eq!(inquiry.email, "ana@x.com");
        assert_eq!(inquiry.mensaje, "hola");
    }

    #[test]
    fn reports_every_missing_field_in_rule_order() {
        let errors = validate_contact(&RawContactPayload::default()).unwrap_err();
        assert_eq!(
            errors,
            vec!["name is required", "email is required", "message is required"]
        );
    }

    #[test]
    fn wrong_typed_fields_count_as_missing() {
        let payload = RawContactPayload {
            nombre: Some(json!(42)),
            email: Some(json!(["a@b.c"])),
            mensaje: Some(json!(null)),
        };
        let errors = validate_contact(&payload).unwrap_err();
        assert_eq!(
            errors,
            vec!["name is required", "email is required", "message is required"]
        );
    }

    #[test]
    fn name_of_exactly_100_chars_passes_101_fails() {
        let ok = "x".repeat(100);
        assert!(validate_contact(&raw(&ok, "a@b.c", "hi")).is_ok());

        let long = "x".repeat(101);
        let errors = validate_contact(&raw(&long, "a@b.c", "hi")).unwrap_err();
        assert_eq!(errors, vec!["name exceeds 100 characters"]);
    }

    #[test]
    fn empty_email_is_not_also_reported_as_malformed() {
        let errors = validate_contact(&raw("Ana", "   ", "hi")).unwrap_err();
        assert_eq!(errors, vec!["email is required"]);
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in [
            "plainaddress",
            "no-at.example.com",
            "two@@signs.com",
            "a@b@c.com",
            "spaces in@local.com",
            "a@nodot",
            "a@.com",
            "a@com.",
            "@missing-local.com",
        ] {
            let errors = validate_contact(&raw("Ana", bad, "hi")).unwrap_err();
            assert_eq!(errors, vec!["invalid email format"], "email: {bad}");
        }
    }

    #[test]
    fn plausible_emails_are_accepted() {
        for good in ["a@b.c", "juan.perez@agrotrack.com", "x+1@sub.domain.co"] {
            assert!(validate_contact(&raw("Ana", good, "hi")).is_ok(), "email: {good}");
        }
    }

    #[test]
    fn overlong_email_with_valid_shape_reports_length() {
        // 255 chars exactly: local of 245 + "@agro.test" (10 chars).
        let local = "a".repeat(245);
        let email = format!("{local}@agro.test");
        assert_eq!(email.chars().count(), 255);
        assert!(validate_contact(&raw("Ana", &email, "hi")).is_ok());

        let email = format!("a{local}@agro.test");
        let errors = validate_contact(&raw("Ana", &email, "hi")).unwrap_err();
        assert_eq!(errors, vec!["email exceeds 255 characters"]);
    }

    #[test]
    fn message_must_be_non_empty_after_trim() {
        let errors = validate_contact(&raw("Ana", "a@b.c", " \t\n ")).unwrap_err();
        assert_eq!(errors, vec!["message is required"]);
    }

    #[test]
    fn validation_never_touches_the_payload() {
        let payload = raw("Ana", "ANA@X.COM", "hola");
        let _ = validate_contact(&payload);
        assert_eq!(as_trimmed_str(&payload.email), Some("ANA@X.COM"));
    }
}
