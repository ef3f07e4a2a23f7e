use super::Screen;
use crate::forms::SemesterSchema;
use crate::models::semester::entities::Semester;
use crate::table::{CellValue, Column};

impl Screen for SemesterSchema {
    const TITLE: &'static str = "Data Semester";
    const PLACEHOLDER: &'static str = "Cari semester...";
    const POSITIVE_LABEL: &'static str = "Aktif";
    const NEGATIVE_LABEL: &'static str = "Tidak Aktif";

    fn columns() -> Vec<Column<Semester>> {
        vec![
            Column::new("nama_semester", "Semester", |r: &Semester| {
                CellValue::text(&r.nama_semester)
            }),
            Column::new("tahun_ajaran", "Tahun Ajaran", |r: &Semester| {
                CellValue::optional(r.tahun_ajaran.as_deref())
            }),
            Column::new("tanggal_mulai", "Tanggal Mulai", |r: &Semester| {
                CellValue::Date(r.tanggal_mulai)
            }),
            Column::new("tanggal_selesai", "Tanggal Selesai", |r: &Semester| {
                CellValue::Date(r.tanggal_selesai)
            }),
            Column::new("status_aktif", "Status", |r: &Semester| {
                CellValue::Flag(r.status_aktif)
            }),
        ]
    }

    fn search_field(record: &Semester) -> &str {
        &record.nama_semester
    }
}
