//! Per-entity screen assembly: columns, stats cards and form options.

pub mod jurusan;
pub mod kelas;
pub mod semester;
pub mod tahun_ajaran;

use serde::{Deserialize, Serialize};

use crate::config::TableConfig;
use crate::errors::Result;
use crate::forms::{EntitySchema, FieldOf};
use crate::models::{ForeignOptions, PaginationQuery, ScreenData};
use crate::table::{Column, RowAction, SortOrder, TableBrowser, TablePage, TableRecord};
use crate::utils::validate::FormField;

/// Query string of a screen listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

/// Table and stats configuration of one entity screen.
pub trait Screen: EntitySchema {
    const TITLE: &'static str;
    const PLACEHOLDER: &'static str;
    const POSITIVE_LABEL: &'static str;
    const NEGATIVE_LABEL: &'static str;

    fn columns() -> Vec<Column<Self::Record>>;

    /// The field the free-text filter matches against.
    fn search_field(record: &Self::Record) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<FormFieldView>,
    pub options: ForeignOptions,
}

/// Everything the client needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub screen: &'static str,
    pub title: &'static str,
    pub stats: Vec<StatCard>,
    pub table: TablePage,
    pub form: FormView,
}

pub fn screen_url<S: Screen>() -> String {
    format!("/admin/{}", S::KIND.collection_path())
}

fn edit_action<S: Screen>(record: &S::Record) -> Vec<RowAction> {
    vec![RowAction {
        name: "edit",
        label: "Edit",
        method: "PUT",
        href: format!("{}/{}", screen_url::<S>(), record.row_id()),
    }]
}

/// Counters are taken as pre-aggregated by the store.
pub fn stat_cards<S: Screen>(data: &ScreenData<S::Record>) -> Vec<StatCard> {
    vec![
        StatCard {
            label: format!("Total {}", S::KIND.label()),
            value: data.stats.total,
        },
        StatCard {
            label: S::POSITIVE_LABEL.to_string(),
            value: data.stats.positive,
        },
        StatCard {
            label: S::NEGATIVE_LABEL.to_string(),
            value: data.stats.negative,
        },
    ]
}

pub fn compose<S: Screen>(
    data: &ScreenData<S::Record>,
    query: &ScreenQuery,
    table_config: &TableConfig,
) -> Result<ScreenView> {
    let mut browser = TableBrowser::new(
        &data.records,
        S::columns(),
        S::search_field,
        S::PLACEHOLDER,
    )
    .with_actions(edit_action::<S>);

    if let Some(search) = &query.search {
        browser.set_filter(search.as_str());
    }
    if let Some(key) = query.sort.as_deref().filter(|key| !key.is_empty()) {
        browser.sort_by(key, query.order.unwrap_or_default())?;
    }
    browser.set_page(
        query.pagination.page,
        table_config.page_size(query.pagination.size),
    );

    Ok(ScreenView {
        screen: S::KIND.collection_path(),
        title: S::TITLE,
        stats: stat_cards::<S>(data),
        table: browser.render(),
        form: FormView {
            action: screen_url::<S>(),
            fields: <FieldOf<S> as FormField>::all()
                .iter()
                .map(|field| FormFieldView {
                    name: field.name(),
                    label: field.label(),
                })
                .collect(),
            options: data.options.clone(),
        },
    })
}
