use super::Screen;
use crate::forms::KelasSchema;
use crate::models::kelas::entities::Kelas;
use crate::table::{CellValue, Column};

/// Grade level as shown to users: 1 -> X, 2 -> XI, 3 -> XII.
pub fn tingkat_label(value: &CellValue) -> String {
    match value {
        CellValue::Integer(1) => "X".to_string(),
        CellValue::Integer(2) => "XI".to_string(),
        CellValue::Integer(3) => "XII".to_string(),
        other => other.display(),
    }
}

impl Screen for KelasSchema {
    const TITLE: &'static str = "Data Kelas";
    const PLACEHOLDER: &'static str = "Cari nama kelas...";
    const POSITIVE_LABEL: &'static str = "Memiliki Siswa";
    const NEGATIVE_LABEL: &'static str = "Kelas Kosong";

    fn columns() -> Vec<Column<Kelas>> {
        vec![
            Column::new("nama_kelas", "Nama Kelas", |r: &Kelas| {
                CellValue::text(&r.nama_kelas)
            }),
            Column::new("tingkat", "Tingkat", |r: &Kelas| CellValue::Integer(r.tingkat))
                .render_with(tingkat_label),
            Column::new("jurusan", "Jurusan", |r: &Kelas| {
                CellValue::optional(r.jurusan.as_deref())
            }),
            Column::new("tahun_ajaran", "Tahun Ajaran", |r: &Kelas| {
                CellValue::optional(r.tahun_ajaran.as_deref())
            }),
            Column::new("wali_kelas", "Wali Kelas", |r: &Kelas| {
                CellValue::optional(r.wali_kelas.as_deref())
            }),
            Column::new("siswa_count", "Jumlah Siswa", |r: &Kelas| {
                CellValue::Integer(r.siswa_count)
            }),
        ]
    }

    fn search_field(record: &Kelas) -> &str {
        &record.nama_kelas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{ScreenData, SelectOption};
    use crate::screens::{ScreenQuery, compose};
    use crate::table::SortOrder;

    fn kelas(id: i64, nama: &str, tingkat: i64, siswa: i64) -> Kelas {
        Kelas {
            id,
            jurusan_id: 3,
            tahun_ajaran_id: 2,
            nama_kelas: nama.into(),
            tingkat,
            wali_kelas_id: None,
            siswa_count: siswa,
            jurusan: Some("Rekayasa Perangkat Lunak".into()),
            tahun_ajaran: Some("2024/2025".into()),
            wali_kelas: None,
        }
    }

    #[test]
    fn test_level_rendered_as_roman_numeral() {
        assert_eq!(tingkat_label(&CellValue::Integer(1)), "X");
        assert_eq!(tingkat_label(&CellValue::Integer(2)), "XI");
        assert_eq!(tingkat_label(&CellValue::Integer(3)), "XII");
        assert_eq!(tingkat_label(&CellValue::Integer(4)), "4");
    }

    #[test]
    fn test_sorted_by_level_descending() {
        let mut data = ScreenData::default();
        data.records = vec![
            kelas(5, "X RPL 1", 1, 32),
            kelas(6, "XII RPL 1", 3, 0),
            kelas(7, "XI RPL 1", 2, 30),
        ];
        data.options.insert(
            "wali_kelas".into(),
            vec![SelectOption::new(101, "Siti Rahmawati, S.Pd.")],
        );
        let query = ScreenQuery {
            sort: Some("tingkat".into()),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };

        let view = compose::<KelasSchema>(&data, &query, &AppConfig::default().table).unwrap();
        let levels: Vec<_> = view
            .table
            .rows
            .iter()
            .map(|row| row.cells[1].as_str())
            .collect();
        assert_eq!(levels, vec!["XII", "XI", "X"]);
        // No homeroom teacher assigned
        assert_eq!(view.table.rows[0].cells[4], "-");
        assert_eq!(view.form.options["wali_kelas"][0].id, 101);
        assert_eq!(view.stats[1].label, "Memiliki Siswa");
    }
}
