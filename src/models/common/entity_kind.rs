use serde::{Deserialize, Serialize};
use std::fmt;

/// The academic reference entities managed by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Jurusan,
    Kelas,
    Semester,
    TahunAjaran,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Jurusan,
        EntityKind::Kelas,
        EntityKind::Semester,
        EntityKind::TahunAjaran,
    ];

    /// Collection path segment on the remote store and on the view server.
    pub fn collection_path(&self) -> &'static str {
        match self {
            EntityKind::Jurusan => "jurusan",
            EntityKind::Kelas => "kelas",
            EntityKind::Semester => "semester",
            EntityKind::TahunAjaran => "tahun-ajaran",
        }
    }

    /// Human label used in toasts and page titles.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Jurusan => "Jurusan",
            EntityKind::Kelas => "Kelas",
            EntityKind::Semester => "Semester",
            EntityKind::TahunAjaran => "Tahun Ajaran",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection_path() == path)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_path(kind.collection_path()), Some(kind));
        }
        assert_eq!(EntityKind::from_path("siswa"), None);
        assert_eq!(EntityKind::TahunAjaran.collection_path(), "tahun-ajaran");
    }
}
