use crate::models::EntityKind;
use crate::models::jurusan::entities::Jurusan;
use crate::models::jurusan::requests::{JurusanDraft, JurusanField, JurusanPayload};
use crate::utils::validate::{FieldErrors, FieldRules};

use super::schema::{EntitySchema, optional_text};

pub struct JurusanSchema;

impl EntitySchema for JurusanSchema {
    type Record = Jurusan;
    type Draft = JurusanDraft;
    type Payload = JurusanPayload;

    const KIND: EntityKind = EntityKind::Jurusan;

    fn rules() -> Vec<FieldRules<JurusanField>> {
        vec![
            FieldRules::new(JurusanField::KodeJurusan)
                .required()
                .max_length(10),
            FieldRules::new(JurusanField::NamaJurusan)
                .required()
                .max_length(255),
            FieldRules::new(JurusanField::Deskripsi).max_length(1000),
        ]
    }

    fn draft_from(record: &Jurusan) -> JurusanDraft {
        JurusanDraft {
            kode_jurusan: record.kode_jurusan.clone(),
            nama_jurusan: record.nama_jurusan.clone(),
            deskripsi: record.deskripsi.clone().unwrap_or_default(),
        }
    }

    fn payload(draft: &JurusanDraft) -> Result<JurusanPayload, FieldErrors<JurusanField>> {
        Ok(JurusanPayload {
            kode_jurusan: draft.kode_jurusan.trim().to_uppercase(),
            nama_jurusan: draft.nama_jurusan.trim().to_string(),
            deskripsi: optional_text(&draft.deskripsi),
        })
    }
}
