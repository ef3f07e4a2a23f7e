use crate::models::EntityKind;
use crate::models::tahun_ajaran::entities::TahunAjaran;
use crate::models::tahun_ajaran::requests::{
    TahunAjaranDraft, TahunAjaranField, TahunAjaranPayload,
};
use crate::utils::validate::{FieldErrors, FieldRules};

use super::schema::{EntitySchema, parse_date};

pub struct TahunAjaranSchema;

impl EntitySchema for TahunAjaranSchema {
    type Record = TahunAjaran;
    type Draft = TahunAjaranDraft;
    type Payload = TahunAjaranPayload;

    const KIND: EntityKind = EntityKind::TahunAjaran;

    fn rules() -> Vec<FieldRules<TahunAjaranField>> {
        vec![
            FieldRules::new(TahunAjaranField::NamaTahunAjaran)
                .required()
                .max_length(255),
            FieldRules::new(TahunAjaranField::TanggalMulai)
                .required()
                .date(),
            FieldRules::new(TahunAjaranField::TanggalSelesai)
                .required()
                .date()
                .after(TahunAjaranField::TanggalMulai),
        ]
    }

    fn draft_from(record: &TahunAjaran) -> TahunAjaranDraft {
        TahunAjaranDraft {
            nama_tahun_ajaran: record.nama_tahun_ajaran.clone(),
            tanggal_mulai: record.tanggal_mulai.format("%Y-%m-%d").to_string(),
            tanggal_selesai: record.tanggal_selesai.format("%Y-%m-%d").to_string(),
            status_aktif: record.status_aktif,
        }
    }

    fn payload(
        draft: &TahunAjaranDraft,
    ) -> Result<TahunAjaranPayload, FieldErrors<TahunAjaranField>> {
        let mut errors = FieldErrors::new();
        let tanggal_mulai =
            parse_date(TahunAjaranField::TanggalMulai, &draft.tanggal_mulai, &mut errors);
        let tanggal_selesai = parse_date(
            TahunAjaranField::TanggalSelesai,
            &draft.tanggal_selesai,
            &mut errors,
        );

        match (tanggal_mulai, tanggal_selesai) {
            (Some(tanggal_mulai), Some(tanggal_selesai)) => Ok(TahunAjaranPayload {
                nama_tahun_ajaran: draft.nama_tahun_ajaran.trim().to_string(),
                tanggal_mulai,
                tanggal_selesai,
                status_aktif: draft.status_aktif,
            }),
            _ => Err(errors),
        }
    }
}
