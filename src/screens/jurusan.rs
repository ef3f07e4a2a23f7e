use super::Screen;
use crate::forms::JurusanSchema;
use crate::models::jurusan::entities::Jurusan;
use crate::table::{CellValue, Column};

impl Screen for JurusanSchema {
    const TITLE: &'static str = "Data Jurusan";
    const PLACEHOLDER: &'static str = "Cari nama jurusan...";
    const POSITIVE_LABEL: &'static str = "Memiliki Kelas";
    const NEGATIVE_LABEL: &'static str = "Belum Ada Kelas";

    fn columns() -> Vec<Column<Jurusan>> {
        vec![
            Column::new("kode_jurusan", "Kode", |r: &Jurusan| {
                CellValue::text(&r.kode_jurusan)
            }),
            Column::new("nama_jurusan", "Nama Jurusan", |r: &Jurusan| {
                CellValue::text(&r.nama_jurusan)
            }),
            Column::new("deskripsi", "Deskripsi", |r: &Jurusan| {
                CellValue::optional(r.deskripsi.as_deref())
            })
            .unsortable(),
            Column::new("kelas_count", "Jumlah Kelas", |r: &Jurusan| {
                CellValue::Integer(r.kelas_count)
            }),
        ]
    }

    fn search_field(record: &Jurusan) -> &str {
        &record.nama_jurusan
    }
}
