use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters pre-aggregated by the remote store for the stats cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: i64,
    pub positive: i64,
    pub negative: i64,
}

/// One entry of a foreign-key selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: i64,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Foreign-key options keyed by selector name (`jurusan`, `tahun_ajaran`, `wali_kelas`).
pub type ForeignOptions = BTreeMap<String, Vec<SelectOption>>;

/// Everything a screen needs from the store: records, counters and selector options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenData<T> {
    pub records: Vec<T>,
    #[serde(default)]
    pub stats: SummaryStats,
    #[serde(default)]
    pub options: ForeignOptions,
}

impl<T> Default for ScreenData<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            stats: SummaryStats::default(),
            options: ForeignOptions::new(),
        }
    }
}
