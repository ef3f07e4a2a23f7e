//! Generic, read-only table over a slice of records.
//!
//! The browser never mutates its input: filtering yields an order-preserving
//! subsequence, sorting is stable over that subsequence and pagination
//! slices the result.

pub mod column;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AdminError, Result};
use crate::models::PaginationInfo;

pub use column::{ActionRenderer, CellValue, Column, RowAction, active_label};

/// Records shown in a table expose a stable identity.
pub trait TableRecord {
    fn row_id(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: &'static str,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHeader {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: i64,
    pub cells: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<RowAction>,
}

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    pub headers: Vec<TableHeader>,
    pub rows: Vec<TableRow>,
    pub pagination: PaginationInfo,
    pub search: String,
    pub placeholder: &'static str,
    pub sort: Option<SortSpec>,
    pub has_actions: bool,
}

pub type SearchAccessor<T> = fn(&T) -> &str;

pub struct TableBrowser<'a, T> {
    records: &'a [T],
    columns: Vec<Column<T>>,
    search_field: SearchAccessor<T>,
    placeholder: &'static str,
    actions: Option<ActionRenderer<T>>,
    filter: String,
    sort: Option<SortSpec>,
    page: i64,
    page_size: i64,
}

impl<'a, T: TableRecord> TableBrowser<'a, T> {
    pub fn new(
        records: &'a [T],
        columns: Vec<Column<T>>,
        search_field: SearchAccessor<T>,
        placeholder: &'static str,
    ) -> Self {
        Self {
            records,
            columns,
            search_field,
            placeholder,
            actions: None,
            filter: String::new(),
            sort: None,
            page: 1,
            page_size: 10,
        }
    }

    /// Adds an actions column rendered from the full record.
    pub fn with_actions(mut self, actions: ActionRenderer<T>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Replaces the filter and returns to the first page.
    pub fn set_filter(&mut self, needle: impl Into<String>) {
        self.filter = needle.into();
        self.page = 1;
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Sorts by the column named `key`. Unknown or unsortable columns are
    /// rejected.
    pub fn sort_by(&mut self, key: &str, order: SortOrder) -> Result<()> {
        let column = self
            .columns
            .iter()
            .find(|column| column.key == key)
            .ok_or_else(|| AdminError::unknown_field(format!("Unknown sort column '{key}'")))?;
        if !column.sortable {
            return Err(AdminError::unknown_field(format!(
                "Column '{key}' is not sortable"
            )));
        }
        self.sort = Some(SortSpec {
            key: column.key,
            order,
        });
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn set_page(&mut self, page: i64, page_size: i64) {
        self.page = page;
        self.page_size = page_size.max(1);
    }

    /// Records whose search field contains the filter, case-insensitively,
    /// in input order. An empty filter matches everything.
    pub fn filtered(&self) -> Vec<&'a T> {
        let needle = self.filter.to_lowercase();
        self.records
            .iter()
            .filter(|record| (self.search_field)(record).to_lowercase().contains(&needle))
            .collect()
    }

    /// Filtered records in display order (stable sort when a sort is set).
    pub fn arranged(&self) -> Vec<&'a T> {
        let mut rows = self.filtered();
        let Some(sort) = &self.sort else {
            return rows;
        };
        if let Some(column) = self.columns.iter().find(|column| column.key == sort.key) {
            rows.sort_by(|a, b| {
                let ordering = column.value(a).compare(&column.value(b));
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn render(&self) -> TablePage {
        let arranged = self.arranged();
        let pagination = PaginationInfo::new(self.page, self.page_size, arranged.len() as i64);

        let rows = arranged
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.page_size as usize)
            .map(|record| TableRow {
                id: record.row_id(),
                cells: self
                    .columns
                    .iter()
                    .map(|column| column.render(record))
                    .collect(),
                actions: self.actions.map(|render| render(record)).unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        debug!(
            "Rendered table page {}/{} ({} rows, filter '{}')",
            pagination.page,
            pagination.total_pages,
            rows.len(),
            self.filter
        );

        TablePage {
            headers: self
                .columns
                .iter()
                .map(|column| TableHeader {
                    key: column.key,
                    header: column.header,
                    sortable: column.sortable,
                })
                .collect(),
            rows,
            pagination,
            search: self.filter.clone(),
            placeholder: self.placeholder,
            sort: self.sort.clone(),
            has_actions: self.actions.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: String,
        size: i64,
    }

    impl TableRecord for Row {
        fn row_id(&self) -> i64 {
            self.id
        }
    }

    fn rows() -> Vec<Row> {
        [
            (1, "Rekayasa Perangkat Lunak", 3),
            (2, "Teknik Komputer dan Jaringan", 1),
            (3, "Multimedia", 3),
            (4, "Akuntansi", 2),
            (5, "Perkantoran", 1),
        ]
        .into_iter()
        .map(|(id, name, size)| Row {
            id,
            name: name.to_string(),
            size,
        })
        .collect()
    }

    fn browser(records: &[Row]) -> TableBrowser<'_, Row> {
        TableBrowser::new(
            records,
            vec![
                Column::new("name", "Nama", |row: &Row| CellValue::text(&row.name)),
                Column::new("size", "Jumlah", |row: &Row| CellValue::Integer(row.size)),
                Column::new("note", "Catatan", |_: &Row| CellValue::Empty).unsortable(),
            ],
            |row: &Row| row.name.as_str(),
            "Cari nama...",
        )
    }

    fn ids(rows: &[&Row]) -> Vec<i64> {
        rows.iter().map(|row| row.id).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_subsequence() {
        let records = rows();
        let mut table = browser(&records);

        table.set_filter("AN");
        assert_eq!(ids(&table.filtered()), vec![1, 2, 4, 5]);

        table.set_filter("kantor");
        assert_eq!(ids(&table.filtered()), vec![5]);

        table.set_filter("tidak ada");
        assert!(table.filtered().is_empty());

        table.set_filter("");
        assert_eq!(ids(&table.filtered()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_is_stable_and_leaves_input_alone() {
        let records = rows();
        let before = records.clone();
        let mut table = browser(&records);

        table.sort_by("size", SortOrder::Asc).unwrap();
        assert_eq!(ids(&table.arranged()), vec![2, 5, 4, 1, 3]);

        table.sort_by("size", SortOrder::Desc).unwrap();
        assert_eq!(ids(&table.arranged()), vec![1, 3, 4, 2, 5]);

        table.sort_by("name", SortOrder::Asc).unwrap();
        assert_eq!(ids(&table.arranged()), vec![4, 3, 5, 1, 2]);

        assert_eq!(records, before);
    }

    #[test]
    fn test_sort_rejects_unknown_columns() {
        let records = rows();
        let mut table = browser(&records);
        assert_eq!(
            table.sort_by("missing", SortOrder::Asc).unwrap_err().code(),
            "E010"
        );
        assert!(table.sort_by("note", SortOrder::Asc).is_err());
    }

    #[test]
    fn test_pagination_clamps_to_last_page() {
        let records = rows();
        let mut table = browser(&records);
        table.set_page(9, 2);

        let page = table.render();
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].id, 5);
        assert_eq!(page.rows[0].cells, vec!["Perkantoran", "1", "-"]);
    }

    #[test]
    fn test_filter_resets_page() {
        let records = rows();
        let mut table = browser(&records);
        table.set_page(3, 2);
        table.set_filter("a");
        let page = table.render();
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.search, "a");
    }

    #[test]
    fn test_actions_receive_full_record() {
        let records = rows();
        let table = browser(&records).with_actions(|row: &Row| {
            vec![RowAction {
                name: "edit",
                label: "Edit",
                method: "PUT",
                href: format!("/rows/{}", row.id),
            }]
        });
        let page = table.render();
        assert!(page.has_actions);
        assert_eq!(page.rows[0].actions[0].href, "/rows/1");
        assert_eq!(page.headers.len(), 3);
    }
}
