use crate::models::EntityKind;
use crate::models::kelas::entities::Kelas;
use crate::models::kelas::requests::{KelasDraft, KelasField, KelasPayload};
use crate::utils::validate::{FieldErrors, FieldRules};

use super::schema::{EntitySchema, parse_id, parse_optional_id};

pub struct KelasSchema;

impl EntitySchema for KelasSchema {
    type Record = Kelas;
    type Draft = KelasDraft;
    type Payload = KelasPayload;

    const KIND: EntityKind = EntityKind::Kelas;

    fn rules() -> Vec<FieldRules<KelasField>> {
        vec![
            FieldRules::new(KelasField::JurusanId).required(),
            FieldRules::new(KelasField::TahunAjaranId).required(),
            FieldRules::new(KelasField::NamaKelas)
                .required()
                .max_length(255),
            FieldRules::new(KelasField::Tingkat)
                .required()
                .integer_between(1, 3),
        ]
    }

    fn draft_from(record: &Kelas) -> KelasDraft {
        KelasDraft {
            jurusan_id: record.jurusan_id.to_string(),
            tahun_ajaran_id: record.tahun_ajaran_id.to_string(),
            nama_kelas: record.nama_kelas.clone(),
            tingkat: record.tingkat.to_string(),
            wali_kelas_id: record
                .wali_kelas_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    fn payload(draft: &KelasDraft) -> Result<KelasPayload, FieldErrors<KelasField>> {
        let mut errors = FieldErrors::new();
        let jurusan_id = parse_id(KelasField::JurusanId, &draft.jurusan_id, &mut errors);
        let tahun_ajaran_id =
            parse_id(KelasField::TahunAjaranId, &draft.tahun_ajaran_id, &mut errors);
        let tingkat = parse_id(KelasField::Tingkat, &draft.tingkat, &mut errors);
        let wali_kelas_id =
            parse_optional_id(KelasField::WaliKelasId, &draft.wali_kelas_id, &mut errors);

        match (jurusan_id, tahun_ajaran_id, tingkat) {
            (Some(jurusan_id), Some(tahun_ajaran_id), Some(tingkat)) if errors.is_empty() => {
                Ok(KelasPayload {
                    jurusan_id,
                    tahun_ajaran_id,
                    nama_kelas: draft.nama_kelas.trim().to_string(),
                    tingkat,
                    wali_kelas_id,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> KelasDraft {
        KelasDraft {
            jurusan_id: "3".into(),
            tahun_ajaran_id: "2".into(),
            nama_kelas: "XI RPL 1".into(),
            tingkat: "2".into(),
            wali_kelas_id: String::new(),
        }
    }

    #[test]
    fn test_foreign_keys_coerced_to_integers() {
        let payload = KelasSchema::payload(&draft()).unwrap();
        assert_eq!(payload.jurusan_id, 3);
        assert_eq!(payload.tahun_ajaran_id, 2);
        assert_eq!(payload.tingkat, 2);
        assert_eq!(payload.wali_kelas_id, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["jurusan_id"].is_i64());
        // Absent optionals are sent as null, not omitted
        assert!(json.as_object().unwrap().contains_key("wali_kelas_id"));
        assert!(json["wali_kelas_id"].is_null());
    }

    #[test]
    fn test_non_numeric_foreign_key_is_a_field_error() {
        let mut bad = draft();
        bad.wali_kelas_id = "guru-7".into();
        let errors = KelasSchema::payload(&bad).unwrap_err();
        assert_eq!(
            errors.get(&KelasField::WaliKelasId).map(String::as_str),
            Some("Wali Kelas tidak valid")
        );
    }

    #[test]
    fn test_level_must_be_one_to_three() {
        let mut bad = draft();
        bad.tingkat = "4".into();
        assert!(KelasSchema::validate(&bad).contains_key(&KelasField::Tingkat));

        bad.tingkat = "3".into();
        assert!(KelasSchema::validate(&bad).is_empty());
    }

    #[test]
    fn test_required_selectors() {
        let errors = KelasSchema::validate(&KelasDraft::default());
        assert!(errors.contains_key(&KelasField::JurusanId));
        assert!(errors.contains_key(&KelasField::TahunAjaranId));
        assert!(errors.contains_key(&KelasField::NamaKelas));
        assert!(errors.contains_key(&KelasField::Tingkat));
        assert!(!errors.contains_key(&KelasField::WaliKelasId));
    }

    #[test]
    fn test_draft_from_record_stringifies_selectors() {
        let record = Kelas {
            id: 5,
            jurusan_id: 3,
            tahun_ajaran_id: 2,
            nama_kelas: "X RPL 1".into(),
            tingkat: 1,
            wali_kelas_id: Some(101),
            siswa_count: 32,
            jurusan: None,
            tahun_ajaran: None,
            wali_kelas: None,
        };
        let draft = KelasSchema::draft_from(&record);
        assert_eq!(draft.jurusan_id, "3");
        assert_eq!(draft.tingkat, "1");
        assert_eq!(draft.wali_kelas_id, "101");
    }
}
