//! Row validation and conversion.
//!
//! Consumes a raw row (plus an optional header mapping) and produces
//! either a validated lead record or a set of field-level errors. Name
//! and status failures are fatal to the row; every other field rule is
//! advisory: the row is kept with the error recorded.

mod extract;
pub mod fields;

pub use extract::extract;
pub use fields::{FieldSeverity, WHATSAPP_MAX_DIGITS, WHATSAPP_MIN_DIGITS, severity};

use tracing::debug;

use leads_model::{CanonicalField, FieldMapping, LeadStatus, RawRow, ValidatedLead, ValidationError};

/// Outcome of validating a single row.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    /// The validated lead, or `None` when a fatal field failed.
    pub lead: Option<ValidatedLead>,
    /// Errors found in the row, fatal and advisory alike.
    pub errors: Vec<ValidationError>,
}

/// Outcome of validating a whole sheet.
#[derive(Debug, Clone, Default)]
pub struct BatchValidation {
    /// Leads from accepted rows, in source order.
    pub leads: Vec<ValidatedLead>,
    /// Accumulated errors from every row.
    pub errors: Vec<ValidationError>,
}

/// Validates one raw row.
///
/// `row_number` is the spreadsheet row for error reporting (header row
/// is 1, first data row 2). With `mapping` present the mapping-driven
/// extraction mode is used; otherwise direct alias lookup.
///
/// Fatal fields short-circuit: a missing name or unknown status returns
/// `lead: None` with exactly that one error, before any other field is
/// examined.
#[must_use]
pub fn validate_row(row: &RawRow, row_number: usize, mapping: Option<&[FieldMapping]>) -> RowOutcome {
    let mut errors = Vec::new();

    // A lead cannot exist without a name, so this check short-circuits
    // regardless of the severity table.
    let name = extract(row, CanonicalField::Name, mapping)
        .map(|raw| fields::clean_name(&raw))
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        return RowOutcome {
            lead: None,
            errors: vec![ValidationError::new(
                row_number,
                CanonicalField::Name,
                "name is required",
            )],
        };
    };

    let status = match extract(row, CanonicalField::Status, mapping) {
        None => LeadStatus::default(),
        Some(raw) => match raw.to_lowercase().parse::<LeadStatus>() {
            Ok(status) => status,
            Err(_) => {
                let error = ValidationError::new(
                    row_number,
                    CanonicalField::Status,
                    format!("invalid status: {raw}"),
                );
                if severity(CanonicalField::Status) == FieldSeverity::Fatal {
                    return RowOutcome {
                        lead: None,
                        errors: vec![error],
                    };
                }
                errors.push(error);
                LeadStatus::default()
            }
        },
    };

    let mut lead = ValidatedLead::named(name);
    lead.status = status;

    if let Some(raw) = extract(row, CanonicalField::Email, mapping) {
        if let Some(message) = fields::check_email(&raw) {
            errors.push(ValidationError::new(row_number, CanonicalField::Email, message));
        }
        // Invalid shapes are still stored as-is; see DESIGN notes.
        lead.contact_email = Some(raw);
    }

    if let Some(raw) = extract(row, CanonicalField::Whatsapp, mapping) {
        let (digits, message) = fields::normalize_whatsapp(&raw);
        if let Some(message) = message {
            errors.push(ValidationError::new(row_number, CanonicalField::Whatsapp, message));
        }
        lead.contact_whatsapp = digits;
    }

    lead.category = extract(row, CanonicalField::Category, mapping);
    lead.source = extract(row, CanonicalField::Source, mapping);
    lead.description = extract(row, CanonicalField::Description, mapping);

    if let Some(raw) = extract(row, CanonicalField::PaymentAmount, mapping) {
        let (amount, message) = fields::parse_amount(&raw);
        if let Some(message) = message {
            errors.push(ValidationError::new(
                row_number,
                CanonicalField::PaymentAmount,
                message,
            ));
        }
        lead.payment_amount = amount;
    }

    if let Some(raw) = extract(row, CanonicalField::IntegrationStartTime, mapping) {
        let (time, message) = fields::normalize_time(&raw);
        if let Some(message) = message {
            errors.push(ValidationError::new(
                row_number,
                CanonicalField::IntegrationStartTime,
                message,
            ));
        }
        lead.integration_start_time = time;
    }

    RowOutcome {
        lead: Some(lead),
        errors,
    }
}

/// Validates a whole sheet, accumulating leads and errors.
///
/// Row numbering starts at 2 (the header occupies row 1).
#[must_use]
pub fn validate_rows(rows: &[RawRow], mapping: Option<&[FieldMapping]>) -> BatchValidation {
    let mut batch = BatchValidation::default();
    for (index, row) in rows.iter().enumerate() {
        let outcome = validate_row(row, index + 2, mapping);
        batch.errors.extend(outcome.errors);
        if let Some(lead) = outcome.lead {
            batch.leads.push(lead);
        }
    }
    debug!(
        rows = rows.len(),
        accepted = batch.leads.len(),
        errors = batch.errors.len(),
        "validated sheet"
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(header, value)| {
                let value = if value.is_empty() {
                    None
                } else {
                    Some((*value).to_string())
                };
                ((*header).to_string(), value)
            })
            .collect()
    }

    #[test]
    fn accepts_minimal_row_with_defaults() {
        let outcome = validate_row(&row(&[("nome", "Ana")]), 2, None);
        let lead = outcome.lead.unwrap();
        assert_eq!(lead.name, "Ana");
        assert_eq!(lead.status, LeadStatus::Novo);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn missing_name_is_fatal_with_one_error() {
        for cells in [
            vec![("email", "a@b.co")],
            vec![("nome", ""), ("email", "a@b.co")],
            vec![("nome", "   "), ("whatsapp", "bad")],
        ] {
            let outcome = validate_row(&row(&cells), 2, None);
            assert!(outcome.lead.is_none());
            assert_eq!(outcome.errors.len(), 1);
            assert_eq!(outcome.errors[0].field.as_str(), "name");
        }
    }

    #[test]
    fn invalid_status_is_fatal_and_short_circuits() {
        let outcome = validate_row(
            &row(&[("nome", "Ana"), ("status", "inexistente"), ("email", "broken")]),
            3,
            None,
        );
        assert!(outcome.lead.is_none());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field.as_str(), "status");
        assert_eq!(outcome.errors[0].row, 3);
    }

    #[test]
    fn status_is_lowercased_before_matching() {
        let outcome = validate_row(&row(&[("nome", "Ana"), ("status", "PAGO")]), 2, None);
        assert_eq!(outcome.lead.unwrap().status, LeadStatus::Pago);
    }

    #[test]
    fn invalid_email_kept_with_error() {
        let outcome = validate_row(&row(&[("nome", "Ana"), ("email", "not-an-email")]), 2, None);
        let lead = outcome.lead.unwrap();
        // The invalid value is retained on purpose; see DESIGN notes.
        assert_eq!(lead.contact_email.as_deref(), Some("not-an-email"));
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field.as_str(), "email");
    }

    #[test]
    fn advisory_errors_accumulate_without_dropping_the_row() {
        let outcome = validate_row(
            &row(&[
                ("nome", "Ana"),
                ("email", "broken"),
                ("whatsapp", "123"),
                ("valor", "-5"),
                ("horario", "25:00"),
            ]),
            2,
            None,
        );
        let lead = outcome.lead.unwrap();
        assert_eq!(outcome.errors.len(), 4);
        assert_eq!(lead.integration_start_time, None);
        assert_eq!(lead.payment_amount, Some(-5.0));
    }

    #[test]
    fn scenario_nome_email_whatsapp() {
        let outcome = validate_row(
            &row(&[("nome", "Ana"), ("e-mail", "ana@x.com"), ("whatsapp", "11987654321")]),
            2,
            None,
        );
        let lead = outcome.lead.unwrap();
        assert_eq!(lead.name, "Ana");
        assert_eq!(lead.contact_email.as_deref(), Some("ana@x.com"));
        assert_eq!(lead.contact_whatsapp.as_deref(), Some("11987654321"));
        assert_eq!(lead.status, LeadStatus::Novo);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn batch_numbers_rows_from_two() {
        let rows = vec![
            row(&[("nome", "Ana")]),
            row(&[("email", "x@y.co")]),
            row(&[("nome", "Bia")]),
        ];
        let batch = validate_rows(&rows, None);
        assert_eq!(batch.leads.len(), 2);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].row, 3);
    }
}
