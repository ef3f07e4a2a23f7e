//! Declarative field validation for entity drafts.
//!
//! A draft exposes its values through [`FieldSource`]; each field carries an
//! ordered list of [`Rule`]s and the first failing rule produces that field's
//! message. Validation is pure: the same draft always yields the same errors.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

/// Current value of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }

    /// Empty or whitespace-only text. Flags are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::Flag(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// A typed field identifier of one entity form.
pub trait FormField: Copy + Ord + Hash + Debug + Send + Sync + 'static {
    /// Wire name, as sent to the remote store.
    fn name(&self) -> &'static str;
    /// Human label used in messages.
    fn label(&self) -> &'static str;
    fn all() -> &'static [Self];

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.name() == name)
    }
}

/// Read access to a draft's values.
pub trait FieldSource {
    type Field: FormField;

    fn value(&self, field: Self::Field) -> FieldValue;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule<F> {
    Required,
    MaxLength(usize),
    /// Non-empty text must be a `YYYY-MM-DD` date.
    Date,
    /// Must be strictly after the date held by the referenced field.
    After(F),
    OneOf(&'static [&'static str]),
    IntegerBetween(i64, i64),
}

/// Rule list for one field.
#[derive(Debug, Clone)]
pub struct FieldRules<F> {
    pub field: F,
    pub rules: Vec<Rule<F>>,
}

impl<F: FormField> FieldRules<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.rules.push(Rule::Required);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.rules.push(Rule::MaxLength(max));
        self
    }

    pub fn date(mut self) -> Self {
        self.rules.push(Rule::Date);
        self
    }

    pub fn after(mut self, other: F) -> Self {
        self.rules.push(Rule::After(other));
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.rules.push(Rule::OneOf(allowed));
        self
    }

    pub fn integer_between(mut self, min: i64, max: i64) -> Self {
        self.rules.push(Rule::IntegerBetween(min, max));
        self
    }
}

/// Invalid field -> message. Empty means valid.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// Validates every field of `source` against `rules`.
pub fn validate_fields<S: FieldSource>(
    source: &S,
    rules: &[FieldRules<S::Field>],
) -> FieldErrors<S::Field> {
    let mut errors = FieldErrors::new();
    for field_rules in rules {
        let value = source.value(field_rules.field);
        if let Some(message) = field_rules
            .rules
            .iter()
            .find_map(|rule| check_rule(source, field_rules.field, &value, rule))
        {
            errors.insert(field_rules.field, message);
        }
    }
    errors
}

fn check_rule<S: FieldSource>(
    source: &S,
    field: S::Field,
    value: &FieldValue,
    rule: &Rule<S::Field>,
) -> Option<String> {
    let label = field.label();
    match rule {
        Rule::Required => value
            .is_blank()
            .then(|| format!("{label} wajib diisi")),
        Rule::MaxLength(max) => {
            let text = value.as_text()?;
            (text.trim().chars().count() > *max)
                .then(|| format!("{label} maksimal {max} karakter"))
        }
        Rule::Date => {
            let text = non_blank(value)?;
            parse_iso_date(text)
                .is_none()
                .then(|| format!("{label} harus berupa tanggal yang valid"))
        }
        Rule::After(other) => {
            // Only fires once both dates are present and well-formed.
            let end = parse_iso_date(non_blank(value)?)?;
            let other_value = source.value(*other);
            let start = parse_iso_date(non_blank(&other_value)?)?;
            (end <= start).then(|| format!("{label} harus setelah {}", other.label()))
        }
        Rule::OneOf(allowed) => {
            let text = non_blank(value)?;
            (!allowed.contains(&text))
                .then(|| format!("{label} harus salah satu dari: {}", allowed.join(", ")))
        }
        Rule::IntegerBetween(min, max) => {
            let text = non_blank(value)?;
            match text.trim().parse::<i64>() {
                Ok(number) if (*min..=*max).contains(&number) => None,
                _ => Some(format!("{label} harus antara {min} dan {max}")),
            }
        }
    }
}

fn non_blank(value: &FieldValue) -> Option<&str> {
    value.as_text().filter(|text| !text.trim().is_empty())
}

/// Strict `YYYY-MM-DD` parsing; chrono alone would accept unpadded parts.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if !ISO_DATE_RE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields::define_form_fields;

    define_form_fields! {
        enum SampleField {
            Code => ("code", "Kode"),
            Name => ("name", "Nama"),
            Start => ("start", "Tanggal Mulai"),
            End => ("end", "Tanggal Selesai"),
            Term => ("term", "Semester"),
            Level => ("level", "Tingkat"),
            Active => ("active", "Status"),
        }
    }

    #[derive(Default)]
    struct Sample {
        code: String,
        name: String,
        start: String,
        end: String,
        term: String,
        level: String,
        active: bool,
    }

    impl FieldSource for Sample {
        type Field = SampleField;

        fn value(&self, field: SampleField) -> FieldValue {
            match field {
                SampleField::Code => FieldValue::text(&self.code),
                SampleField::Name => FieldValue::text(&self.name),
                SampleField::Start => FieldValue::text(&self.start),
                SampleField::End => FieldValue::text(&self.end),
                SampleField::Term => FieldValue::text(&self.term),
                SampleField::Level => FieldValue::text(&self.level),
                SampleField::Active => FieldValue::Flag(self.active),
            }
        }
    }

    fn rules() -> Vec<FieldRules<SampleField>> {
        vec![
            FieldRules::new(SampleField::Code).required().max_length(10),
            FieldRules::new(SampleField::Name).required().max_length(255),
            FieldRules::new(SampleField::Start).required().date(),
            FieldRules::new(SampleField::End)
                .required()
                .date()
                .after(SampleField::Start),
            FieldRules::new(SampleField::Term).one_of(&["Ganjil", "Genap"]),
            FieldRules::new(SampleField::Level).integer_between(1, 3),
            FieldRules::new(SampleField::Active).required(),
        ]
    }

    fn valid_sample() -> Sample {
        Sample {
            code: "RPL".into(),
            name: "Rekayasa Perangkat Lunak".into(),
            start: "2024-07-01".into(),
            end: "2025-06-30".into(),
            term: "Ganjil".into(),
            level: "2".into(),
            active: false,
        }
    }

    #[test]
    fn test_valid_sample_has_no_errors() {
        assert!(validate_fields(&valid_sample(), &rules()).is_empty());
    }

    #[test]
    fn test_required_rejects_empty_and_whitespace() {
        for blank in ["", "   ", "\t\n"] {
            let sample = Sample {
                name: blank.into(),
                ..valid_sample()
            };
            let errors = validate_fields(&sample, &rules());
            assert_eq!(
                errors.get(&SampleField::Name).map(String::as_str),
                Some("Nama wajib diisi")
            );
        }
    }

    #[test]
    fn test_max_length_ignores_surrounding_whitespace() {
        let sample = Sample {
            code: "  ABCDEFGHIJ\t".into(),
            ..valid_sample()
        };
        assert!(!validate_fields(&sample, &rules()).contains_key(&SampleField::Code));

        let sample = Sample {
            code: " ABCDEFGHIJK ".into(),
            ..valid_sample()
        };
        assert!(validate_fields(&sample, &rules()).contains_key(&SampleField::Code));
    }

    #[test]
    fn test_max_length_boundary_counts_chars() {
        let sample = Sample {
            code: "ABCDEFGHIJ".into(),
            ..valid_sample()
        };
        assert!(!validate_fields(&sample, &rules()).contains_key(&SampleField::Code));

        let sample = Sample {
            code: "ABCDEFGHIJK".into(),
            ..valid_sample()
        };
        assert_eq!(
            validate_fields(&sample, &rules())
                .get(&SampleField::Code)
                .map(String::as_str),
            Some("Kode maksimal 10 karakter")
        );

        // Ten multi-byte characters are still ten characters.
        let sample = Sample {
            code: "ÄÖÜÄÖÜÄÖÜÄ".into(),
            ..valid_sample()
        };
        assert!(!validate_fields(&sample, &rules()).contains_key(&SampleField::Code));
    }

    #[test]
    fn test_after_rejects_equal_and_earlier_end() {
        for end in ["2024-06-01", "2024-07-01"] {
            let sample = Sample {
                end: end.into(),
                ..valid_sample()
            };
            let errors = validate_fields(&sample, &rules());
            assert_eq!(
                errors.get(&SampleField::End).map(String::as_str),
                Some("Tanggal Selesai harus setelah Tanggal Mulai")
            );
            assert!(!errors.contains_key(&SampleField::Start));
        }

        let sample = Sample {
            end: "2024-07-02".into(),
            ..valid_sample()
        };
        assert!(validate_fields(&sample, &rules()).is_empty());
    }

    #[test]
    fn test_after_skipped_when_start_missing() {
        let sample = Sample {
            start: String::new(),
            end: "2000-01-01".into(),
            ..valid_sample()
        };
        let errors = validate_fields(&sample, &rules());
        assert!(errors.contains_key(&SampleField::Start));
        assert!(!errors.contains_key(&SampleField::End));
    }

    #[test]
    fn test_date_requires_padded_iso_format() {
        assert!(parse_iso_date("2024-07-01").is_some());
        assert!(parse_iso_date("2024-7-1").is_none());
        assert!(parse_iso_date("2024-02-30").is_none());
        assert!(parse_iso_date("01/07/2024").is_none());

        let sample = Sample {
            start: "2024-7-1".into(),
            ..valid_sample()
        };
        assert_eq!(
            validate_fields(&sample, &rules())
                .get(&SampleField::Start)
                .map(String::as_str),
            Some("Tanggal Mulai harus berupa tanggal yang valid")
        );
    }

    #[test]
    fn test_one_of_and_integer_between() {
        let sample = Sample {
            term: "Pendek".into(),
            level: "4".into(),
            ..valid_sample()
        };
        let errors = validate_fields(&sample, &rules());
        assert_eq!(
            errors.get(&SampleField::Term).map(String::as_str),
            Some("Semester harus salah satu dari: Ganjil, Genap")
        );
        assert_eq!(
            errors.get(&SampleField::Level).map(String::as_str),
            Some("Tingkat harus antara 1 dan 3")
        );

        let sample = Sample {
            level: "dua".into(),
            ..valid_sample()
        };
        assert!(validate_fields(&sample, &rules()).contains_key(&SampleField::Level));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let sample = Sample {
            end: String::new(),
            ..valid_sample()
        };
        assert_eq!(
            validate_fields(&sample, &rules())
                .get(&SampleField::End)
                .map(String::as_str),
            Some("Tanggal Selesai wajib diisi")
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let sample = Sample::default();
        let first = validate_fields(&sample, &rules());
        let second = validate_fields(&sample, &rules());
        assert_eq!(first, second);
        assert_eq!(
            first.keys().copied().collect::<Vec<_>>(),
            vec![SampleField::Code, SampleField::Name, SampleField::Start, SampleField::End]
        );
    }

    #[test]
    fn test_field_lookup_by_name() {
        assert_eq!(SampleField::from_name("end"), Some(SampleField::End));
        assert_eq!(SampleField::from_name("missing"), None);
    }
}
