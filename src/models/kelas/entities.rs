use serde::{Deserialize, Serialize};

use crate::table::TableRecord;

/// A class grouping students under a major and an academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kelas {
    pub id: i64,
    pub jurusan_id: i64,
    pub tahun_ajaran_id: i64,
    pub nama_kelas: String,
    // 1..=3, displayed as X / XI / XII
    pub tingkat: i64,
    // Homeroom teacher
    pub wali_kelas_id: Option<i64>,
    #[serde(default)]
    pub siswa_count: i64,
    // Display projections resolved by the store
    #[serde(default)]
    pub jurusan: Option<String>,
    #[serde(default)]
    pub tahun_ajaran: Option<String>,
    #[serde(default)]
    pub wali_kelas: Option<String>,
}

impl TableRecord for Kelas {
    fn row_id(&self) -> i64 {
        self.id
    }
}
