use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::forms::fields::define_form_fields;
use crate::forms::schema::{FormDraft, expect_text};
use crate::utils::validate::{FieldSource, FieldValue};

define_form_fields! {
    pub enum JurusanField {
        KodeJurusan => ("kode_jurusan", "Kode Jurusan"),
        NamaJurusan => ("nama_jurusan", "Nama Jurusan"),
        Deskripsi => ("deskripsi", "Deskripsi"),
    }
}

// Form draft, mirrors the modal inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JurusanDraft {
    pub kode_jurusan: String,
    pub nama_jurusan: String,
    pub deskripsi: String,
}

impl FieldSource for JurusanDraft {
    type Field = JurusanField;

    fn value(&self, field: JurusanField) -> FieldValue {
        match field {
            JurusanField::KodeJurusan => FieldValue::text(&self.kode_jurusan),
            JurusanField::NamaJurusan => FieldValue::text(&self.nama_jurusan),
            JurusanField::Deskripsi => FieldValue::text(&self.deskripsi),
        }
    }
}

impl FormDraft for JurusanDraft {
    fn set(&mut self, field: JurusanField, value: FieldValue) -> Result<()> {
        let text = expect_text(field, value)?;
        match field {
            // Codes are uppercased on every keystroke
            JurusanField::KodeJurusan => self.kode_jurusan = text.to_uppercase(),
            JurusanField::NamaJurusan => self.nama_jurusan = text,
            JurusanField::Deskripsi => self.deskripsi = text,
        }
        Ok(())
    }
}

// Create / update request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurusanPayload {
    pub kode_jurusan: String,
    pub nama_jurusan: String,
    pub deskripsi: Option<String>,
}
