use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Raw value of one cell, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Flag(bool),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// `Empty` for `None`, otherwise converts the inner value.
    pub fn optional<V: Into<CellValue>>(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }

    /// Default rendering when a column has no custom renderer.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) if text.trim().is_empty() => "-".to_string(),
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(number) => number.to_string(),
            CellValue::Flag(flag) => active_label(*flag).to_string(),
            CellValue::Date(date) => date.format("%d/%m/%Y").to_string(),
            CellValue::Empty => "-".to_string(),
        }
    }

    /// Total order for sorting. Empty cells sort first; text compares
    /// case-insensitively; mismatched kinds fall back to their display.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Flag(a), CellValue::Flag(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Flag(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

pub fn active_label(active: bool) -> &'static str {
    if active { "Aktif" } else { "Tidak Aktif" }
}

pub type Accessor<T> = fn(&T) -> CellValue;
pub type Renderer = fn(&CellValue) -> String;
pub type ActionRenderer<T> = fn(&T) -> Vec<RowAction>;

/// One table column: a header, how to read the value and how to show it.
pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    accessor: Accessor<T>,
    renderer: Option<Renderer>,
    pub sortable: bool,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, header: &'static str, accessor: Accessor<T>) -> Self {
        Self {
            key,
            header,
            accessor,
            renderer: None,
            sortable: true,
        }
    }

    pub fn render_with(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    pub fn render(&self, record: &T) -> String {
        let value = self.value(record);
        match self.renderer {
            // Custom renderers never see missing values
            Some(_) if value == CellValue::Empty => value.display(),
            Some(renderer) => renderer(&value),
            None => value.display(),
        }
    }
}

/// A per-row action, e.g. opening the edit form for that record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub name: &'static str,
    pub label: &'static str,
    pub method: &'static str,
    pub href: String,
}
