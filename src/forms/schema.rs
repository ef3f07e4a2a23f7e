use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::errors::{AdminError, Result};
use crate::models::EntityKind;
use crate::table::TableRecord;
use crate::utils::validate::{
    FieldErrors, FieldRules, FieldSource, FieldValue, FormField, validate_fields,
};

/// Editable, typed draft of one entity.
pub trait FormDraft:
    FieldSource + Clone + Default + Debug + PartialEq + Send + Sync + 'static
{
    /// Writes one field, applying any input normalization (e.g. uppercasing).
    fn set(&mut self, field: Self::Field, value: FieldValue) -> Result<()>;
}

pub type FieldOf<S> = <<S as EntitySchema>::Draft as FieldSource>::Field;

/// Static description of one entity form: rules, seeding and payload coercion.
pub trait EntitySchema: Send + Sync + 'static {
    type Record: TableRecord + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Draft: FormDraft;
    type Payload: Serialize + Debug;

    const KIND: EntityKind;

    fn rules() -> Vec<FieldRules<FieldOf<Self>>>;

    /// Seeds an edit draft from an existing record.
    fn draft_from(record: &Self::Record) -> Self::Draft;

    /// Converts a validated draft into the wire payload. Coercion failures
    /// (e.g. a foreign key that is not a number) are reported per field.
    fn payload(
        draft: &Self::Draft,
    ) -> std::result::Result<Self::Payload, FieldErrors<FieldOf<Self>>>;

    fn validate(draft: &Self::Draft) -> FieldErrors<FieldOf<Self>> {
        validate_fields(draft, &Self::rules())
    }
}

pub(crate) fn expect_text<F: FormField>(field: F, value: FieldValue) -> Result<String> {
    match value {
        FieldValue::Text(text) => Ok(text),
        FieldValue::Flag(_) => Err(AdminError::validation(format!(
            "{} expects a text value",
            field.name()
        ))),
    }
}

pub(crate) fn expect_flag<F: FormField>(field: F, value: FieldValue) -> Result<bool> {
    match value {
        FieldValue::Flag(flag) => Ok(flag),
        FieldValue::Text(_) => Err(AdminError::validation(format!(
            "{} expects a boolean value",
            field.name()
        ))),
    }
}

/// Trimmed text, `None` when empty.
pub(crate) fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn parse_id<F: FormField>(
    field: F,
    text: &str,
    errors: &mut FieldErrors<F>,
) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.insert(field, format!("{} tidak valid", field.label()));
            None
        }
    }
}

pub(crate) fn parse_optional_id<F: FormField>(
    field: F,
    text: &str,
    errors: &mut FieldErrors<F>,
) -> Option<i64> {
    if text.trim().is_empty() {
        None
    } else {
        parse_id(field, text, errors)
    }
}

pub(crate) fn parse_date<F: FormField>(
    field: F,
    text: &str,
    errors: &mut FieldErrors<F>,
) -> Option<chrono::NaiveDate> {
    let date = crate::utils::validate::parse_iso_date(text);
    if date.is_none() {
        errors.insert(
            field,
            format!("{} harus berupa tanggal yang valid", field.label()),
        );
    }
    date
}
