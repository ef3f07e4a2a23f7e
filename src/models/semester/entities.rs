use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::TableRecord;

pub const NAMA_SEMESTER: &[&str] = &["Ganjil", "Genap"];

/// A half-year term inside an academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub tahun_ajaran_id: i64,
    // One of NAMA_SEMESTER
    pub nama_semester: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_aktif: bool,
    #[serde(default)]
    pub tahun_ajaran: Option<String>,
}

impl TableRecord for Semester {
    fn row_id(&self) -> i64 {
        self.id
    }
}
