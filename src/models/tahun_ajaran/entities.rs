use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::TableRecord;

/// An academic year, e.g. "2024/2025".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TahunAjaran {
    pub id: i64,
    pub nama_tahun_ajaran: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_aktif: bool,
    #[serde(default)]
    pub semester_count: i64,
}

impl TableRecord for TahunAjaran {
    fn row_id(&self) -> i64 {
        self.id
    }
}
