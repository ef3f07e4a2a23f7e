use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::forms::fields::define_form_fields;
use crate::forms::schema::{FormDraft, expect_flag, expect_text};
use crate::utils::validate::{FieldSource, FieldValue};

define_form_fields! {
    pub enum TahunAjaranField {
        NamaTahunAjaran => ("nama_tahun_ajaran", "Nama Tahun Ajaran"),
        TanggalMulai => ("tanggal_mulai", "Tanggal Mulai"),
        TanggalSelesai => ("tanggal_selesai", "Tanggal Selesai"),
        StatusAktif => ("status_aktif", "Status Aktif"),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TahunAjaranDraft {
    pub nama_tahun_ajaran: String,
    pub tanggal_mulai: String,
    pub tanggal_selesai: String,
    pub status_aktif: bool,
}

impl FieldSource for TahunAjaranDraft {
    type Field = TahunAjaranField;

    fn value(&self, field: TahunAjaranField) -> FieldValue {
        match field {
            TahunAjaranField::NamaTahunAjaran => FieldValue::text(&self.nama_tahun_ajaran),
            TahunAjaranField::TanggalMulai => FieldValue::text(&self.tanggal_mulai),
            TahunAjaranField::TanggalSelesai => FieldValue::text(&self.tanggal_selesai),
            TahunAjaranField::StatusAktif => FieldValue::Flag(self.status_aktif),
        }
    }
}

impl FormDraft for TahunAjaranDraft {
    fn set(&mut self, field: TahunAjaranField, value: FieldValue) -> Result<()> {
        match field {
            TahunAjaranField::StatusAktif => self.status_aktif = expect_flag(field, value)?,
            TahunAjaranField::NamaTahunAjaran => {
                self.nama_tahun_ajaran = expect_text(field, value)?
            }
            TahunAjaranField::TanggalMulai => self.tanggal_mulai = expect_text(field, value)?,
            TahunAjaranField::TanggalSelesai => {
                self.tanggal_selesai = expect_text(field, value)?
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TahunAjaranPayload {
    pub nama_tahun_ajaran: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_aktif: bool,
}
