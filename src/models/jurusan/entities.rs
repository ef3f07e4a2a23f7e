use serde::{Deserialize, Serialize};

use crate::table::TableRecord;

/// A major / vocational track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurusan {
    pub id: i64,
    // Short uppercase code, e.g. "RPL"
    pub kode_jurusan: String,
    pub nama_jurusan: String,
    pub deskripsi: Option<String>,
    // Number of classes under this major, computed by the store
    #[serde(default)]
    pub kelas_count: i64,
}

impl TableRecord for Jurusan {
    fn row_id(&self) -> i64 {
        self.id
    }
}
