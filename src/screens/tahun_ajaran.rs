use super::Screen;
use crate::forms::TahunAjaranSchema;
use crate::models::tahun_ajaran::entities::TahunAjaran;
use crate::table::{CellValue, Column};

impl Screen for TahunAjaranSchema {
    const TITLE: &'static str = "Data Tahun Ajaran";
    const PLACEHOLDER: &'static str = "Cari tahun ajaran...";
    const POSITIVE_LABEL: &'static str = "Aktif";
    const NEGATIVE_LABEL: &'static str = "Tidak Aktif";

    fn columns() -> Vec<Column<TahunAjaran>> {
        vec![
            Column::new("nama_tahun_ajaran", "Tahun Ajaran", |r: &TahunAjaran| {
                CellValue::text(&r.nama_tahun_ajaran)
            }),
            Column::new("tanggal_mulai", "Tanggal Mulai", |r: &TahunAjaran| {
                CellValue::Date(r.tanggal_mulai)
            }),
            Column::new("tanggal_selesai", "Tanggal Selesai", |r: &TahunAjaran| {
                CellValue::Date(r.tanggal_selesai)
            }),
            Column::new("semester_count", "Jumlah Semester", |r: &TahunAjaran| {
                CellValue::Integer(r.semester_count)
            }),
            Column::new("status_aktif", "Status", |r: &TahunAjaran| {
                CellValue::Flag(r.status_aktif)
            }),
        ]
    }

    fn search_field(record: &TahunAjaran) -> &str {
        &record.nama_tahun_ajaran
    }
}
