use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::forms::fields::define_form_fields;
use crate::forms::schema::{FormDraft, expect_flag, expect_text};
use crate::utils::validate::{FieldSource, FieldValue};

define_form_fields! {
    pub enum SemesterField {
        TahunAjaranId => ("tahun_ajaran_id", "Tahun Ajaran"),
        NamaSemester => ("nama_semester", "Nama Semester"),
        TanggalMulai => ("tanggal_mulai", "Tanggal Mulai"),
        TanggalSelesai => ("tanggal_selesai", "Tanggal Selesai"),
        StatusAktif => ("status_aktif", "Status Aktif"),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemesterDraft {
    pub tahun_ajaran_id: String,
    pub nama_semester: String,
    pub tanggal_mulai: String,
    pub tanggal_selesai: String,
    pub status_aktif: bool,
}

impl FieldSource for SemesterDraft {
    type Field = SemesterField;

    fn value(&self, field: SemesterField) -> FieldValue {
        match field {
            SemesterField::TahunAjaranId => FieldValue::text(&self.tahun_ajaran_id),
            SemesterField::NamaSemester => FieldValue::text(&self.nama_semester),
            SemesterField::TanggalMulai => FieldValue::text(&self.tanggal_mulai),
            SemesterField::TanggalSelesai => FieldValue::text(&self.tanggal_selesai),
            SemesterField::StatusAktif => FieldValue::Flag(self.status_aktif),
        }
    }
}

impl FormDraft for SemesterDraft {
    fn set(&mut self, field: SemesterField, value: FieldValue) -> Result<()> {
        match field {
            SemesterField::StatusAktif => self.status_aktif = expect_flag(field, value)?,
            SemesterField::TahunAjaranId => self.tahun_ajaran_id = expect_text(field, value)?,
            SemesterField::NamaSemester => self.nama_semester = expect_text(field, value)?,
            SemesterField::TanggalMulai => self.tanggal_mulai = expect_text(field, value)?,
            SemesterField::TanggalSelesai => self.tanggal_selesai = expect_text(field, value)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterPayload {
    pub tahun_ajaran_id: i64,
    pub nama_semester: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_aktif: bool,
}
