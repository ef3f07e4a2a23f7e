use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::forms::fields::define_form_fields;
use crate::forms::schema::{FormDraft, expect_text};
use crate::utils::validate::{FieldSource, FieldValue};

define_form_fields! {
    pub enum KelasField {
        JurusanId => ("jurusan_id", "Jurusan"),
        TahunAjaranId => ("tahun_ajaran_id", "Tahun Ajaran"),
        NamaKelas => ("nama_kelas", "Nama Kelas"),
        Tingkat => ("tingkat", "Tingkat"),
        WaliKelasId => ("wali_kelas_id", "Wali Kelas"),
    }
}

// Selector values are kept as strings, the way select inputs report them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KelasDraft {
    pub jurusan_id: String,
    pub tahun_ajaran_id: String,
    pub nama_kelas: String,
    pub tingkat: String,
    pub wali_kelas_id: String,
}

impl FieldSource for KelasDraft {
    type Field = KelasField;

    fn value(&self, field: KelasField) -> FieldValue {
        match field {
            KelasField::JurusanId => FieldValue::text(&self.jurusan_id),
            KelasField::TahunAjaranId => FieldValue::text(&self.tahun_ajaran_id),
            KelasField::NamaKelas => FieldValue::text(&self.nama_kelas),
            KelasField::Tingkat => FieldValue::text(&self.tingkat),
            KelasField::WaliKelasId => FieldValue::text(&self.wali_kelas_id),
        }
    }
}

impl FormDraft for KelasDraft {
    fn set(&mut self, field: KelasField, value: FieldValue) -> Result<()> {
        let text = expect_text(field, value)?;
        match field {
            KelasField::JurusanId => self.jurusan_id = text,
            KelasField::TahunAjaranId => self.tahun_ajaran_id = text,
            KelasField::NamaKelas => self.nama_kelas = text,
            KelasField::Tingkat => self.tingkat = text,
            KelasField::WaliKelasId => self.wali_kelas_id = text,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KelasPayload {
    pub jurusan_id: i64,
    pub tahun_ajaran_id: i64,
    pub nama_kelas: String,
    pub tingkat: i64,
    pub wali_kelas_id: Option<i64>,
}
