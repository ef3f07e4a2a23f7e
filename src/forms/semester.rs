use crate::models::EntityKind;
use crate::models::semester::entities::{NAMA_SEMESTER, Semester};
use crate::models::semester::requests::{SemesterDraft, SemesterField, SemesterPayload};
use crate::utils::validate::{FieldErrors, FieldRules};

use super::schema::{EntitySchema, parse_date, parse_id};

pub struct SemesterSchema;

impl EntitySchema for SemesterSchema {
    type Record = Semester;
    type Draft = SemesterDraft;
    type Payload = SemesterPayload;

    const KIND: EntityKind = EntityKind::Semester;

    fn rules() -> Vec<FieldRules<SemesterField>> {
        vec![
            FieldRules::new(SemesterField::TahunAjaranId).required(),
            FieldRules::new(SemesterField::NamaSemester)
                .required()
                .one_of(NAMA_SEMESTER),
            FieldRules::new(SemesterField::TanggalMulai)
                .required()
                .date(),
            FieldRules::new(SemesterField::TanggalSelesai)
                .required()
                .date()
                .after(SemesterField::TanggalMulai),
        ]
    }

    fn draft_from(record: &Semester) -> SemesterDraft {
        SemesterDraft {
            tahun_ajaran_id: record.tahun_ajaran_id.to_string(),
            nama_semester: record.nama_semester.clone(),
            tanggal_mulai: record.tanggal_mulai.format("%Y-%m-%d").to_string(),
            tanggal_selesai: record.tanggal_selesai.format("%Y-%m-%d").to_string(),
            status_aktif: record.status_aktif,
        }
    }

    fn payload(draft: &SemesterDraft) -> Result<SemesterPayload, FieldErrors<SemesterField>> {
        let mut errors = FieldErrors::new();
        let tahun_ajaran_id =
            parse_id(SemesterField::TahunAjaranId, &draft.tahun_ajaran_id, &mut errors);
        let tanggal_mulai =
            parse_date(SemesterField::TanggalMulai, &draft.tanggal_mulai, &mut errors);
        let tanggal_selesai =
            parse_date(SemesterField::TanggalSelesai, &draft.tanggal_selesai, &mut errors);

        match (tahun_ajaran_id, tanggal_mulai, tanggal_selesai) {
            (Some(tahun_ajaran_id), Some(tanggal_mulai), Some(tanggal_selesai)) => {
                Ok(SemesterPayload {
                    tahun_ajaran_id,
                    nama_semester: draft.nama_semester.trim().to_string(),
                    tanggal_mulai,
                    tanggal_selesai,
                    status_aktif: draft.status_aktif,
                })
            }
            _ => Err(errors),
        }
    }
}
