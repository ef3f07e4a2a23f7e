use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Notify;

use super::*;
use crate::gateway::memory::MemoryRemoteStore;
use crate::gateway::MutationOutcome;
use crate::models::EntityKind;
use crate::models::jurusan::requests::JurusanField;
use crate::models::semester::entities::Semester;
use crate::models::semester::requests::SemesterField;
use crate::models::tahun_ajaran::requests::{TahunAjaranDraft, TahunAjaranField};
use crate::notify::{FlashNotifier, ToastLevel};

/// Holds every mutation until the test releases it.
struct GatedGateway {
    inner: Arc<MemoryRemoteStore>,
    gate: Notify,
}

#[async_trait]
impl MutationGateway for GatedGateway {
    async fn create(&self, kind: EntityKind, payload: Value) -> MutationOutcome {
        self.gate.notified().await;
        self.inner.create(kind, payload).await
    }

    async fn update(&self, kind: EntityKind, id: i64, payload: Value) -> MutationOutcome {
        self.gate.notified().await;
        self.inner.update(kind, id, payload).await
    }
}

fn controller<S: EntitySchema>(
    store: &Arc<MemoryRemoteStore>,
) -> (FormController<S>, Arc<FlashNotifier>) {
    let notifier = Arc::new(FlashNotifier::new());
    let form = FormController::new(store.clone(), notifier.clone());
    (form, notifier)
}

fn gated<S: EntitySchema>(
    store: &Arc<MemoryRemoteStore>,
) -> (FormController<S>, Arc<GatedGateway>, Arc<FlashNotifier>) {
    let gateway = Arc::new(GatedGateway {
        inner: store.clone(),
        gate: Notify::new(),
    });
    let notifier = Arc::new(FlashNotifier::new());
    let form = FormController::new(gateway.clone(), notifier.clone());
    (form, gateway, notifier)
}

fn fill_tahun_ajaran(form: &FormController<TahunAjaranSchema>, end: &str) {
    form.change_field(TahunAjaranField::NamaTahunAjaran, "2024/2025")
        .unwrap();
    form.change_field(TahunAjaranField::TanggalMulai, "2024-07-01")
        .unwrap();
    form.change_field(TahunAjaranField::TanggalSelesai, end)
        .unwrap();
    form.change_field(TahunAjaranField::StatusAktif, true)
        .unwrap();
}

#[tokio::test]
async fn test_create_blocked_until_dates_are_ordered() {
    let store = Arc::new(MemoryRemoteStore::new());
    let (form, notifier) = controller::<TahunAjaranSchema>(&store);

    form.open(None);
    assert_eq!(form.mode(), FormMode::Create);
    fill_tahun_ajaran(&form, "2024-06-01");

    let outcome = form.submit().await;
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected local validation failure, got {outcome:?}");
    };
    assert_eq!(
        errors
            .get(&TahunAjaranField::TanggalSelesai)
            .map(String::as_str),
        Some("Tanggal Selesai harus setelah Tanggal Mulai")
    );
    assert!(store.calls().is_empty());
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.errors(), errors);

    // Editing the field clears its inline error
    form.change_field(TahunAjaranField::TanggalSelesai, "2025-06-30")
        .unwrap();
    assert!(form.errors().is_empty());

    assert_eq!(form.submit().await, SubmitOutcome::Saved);

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, EntityKind::TahunAjaran);
    assert_eq!(calls[0].intent, MutationIntent::Create);
    assert_eq!(
        calls[0].payload,
        json!({
            "nama_tahun_ajaran": "2024/2025",
            "tanggal_mulai": "2024-07-01",
            "tanggal_selesai": "2025-06-30",
            "status_aktif": true
        })
    );

    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(form.draft(), TahunAjaranDraft::default());

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Success);
    assert_eq!(toasts[0].message, "Tahun Ajaran berhasil ditambahkan");
}

#[tokio::test]
async fn test_toggle_active_sends_one_full_update() {
    let store = Arc::new(MemoryRemoteStore::new());
    let record = Semester {
        id: 6,
        tahun_ajaran_id: 2,
        nama_semester: "Ganjil".into(),
        tanggal_mulai: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        tanggal_selesai: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
        status_aktif: false,
        tahun_ajaran: None,
    };
    store
        .seed_records(EntityKind::Semester, std::slice::from_ref(&record))
        .unwrap();
    let (form, notifier) = controller::<SemesterSchema>(&store);

    form.open(Some(record.clone()));
    assert_eq!(form.mode(), FormMode::Edit(6));
    assert_eq!(form.selected(), Some(record));
    form.change_field(SemesterField::StatusAktif, true).unwrap();

    assert_eq!(form.submit().await, SubmitOutcome::Saved);

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].intent, MutationIntent::Update { id: 6 });
    assert_eq!(
        calls[0].payload,
        json!({
            "tahun_ajaran_id": 2,
            "nama_semester": "Ganjil",
            "tanggal_mulai": "2024-07-15",
            "tanggal_selesai": "2024-12-20",
            "status_aktif": true
        })
    );
    assert_eq!(store.records(EntityKind::Semester)[0]["status_aktif"], json!(true));
    assert_eq!(
        notifier.toasts()[0].message,
        "Semester berhasil diperbarui"
    );
}

#[tokio::test]
async fn test_double_submit_sends_one_mutation() {
    let store = Arc::new(MemoryRemoteStore::new());
    let (form, gateway, _notifier) = gated::<TahunAjaranSchema>(&store);
    form.open(None);
    fill_tahun_ajaran(&form, "2025-06-30");

    let (first, second, _) = tokio::join!(form.submit(), form.submit(), async {
        tokio::task::yield_now().await;
        assert_eq!(form.phase(), FormPhase::Submitting);
        // Field changes are refused while the mutation is pending
        assert!(form
            .change_field(TahunAjaranField::NamaTahunAjaran, "2025/2026")
            .is_err());
        gateway.gate.notify_one();
    });

    assert_eq!(first, SubmitOutcome::Saved);
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(store.calls().len(), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_late_completion_does_not_touch_new_session() {
    let store = Arc::new(MemoryRemoteStore::new());
    let (form, gateway, notifier) = gated::<TahunAjaranSchema>(&store);
    form.open(None);
    fill_tahun_ajaran(&form, "2025-06-30");

    let (outcome, _) = tokio::join!(form.submit(), async {
        tokio::task::yield_now().await;
        form.close();
        assert_eq!(form.phase(), FormPhase::Closed);
        // Reopening starts a new session; the old mutation still holds the lock
        form.open(None);
        assert_eq!(form.phase(), FormPhase::Submitting);
        gateway.gate.notify_one();
    });

    assert_eq!(outcome, SubmitOutcome::Saved);
    // The stale success neither closed the reopened form nor cleared it again
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft(), TahunAjaranDraft::default());
    assert_eq!(notifier.toasts().len(), 1);
    assert_eq!(store.records(EntityKind::TahunAjaran).len(), 1);
}

#[tokio::test]
async fn test_completion_after_close_leaves_form_closed() {
    let store = Arc::new(MemoryRemoteStore::new());
    let (form, gateway, _notifier) = gated::<TahunAjaranSchema>(&store);
    form.open(None);
    fill_tahun_ajaran(&form, "2025-06-30");

    let (outcome, _) = tokio::join!(form.submit(), async {
        tokio::task::yield_now().await;
        form.close();
        form.close();
        gateway.gate.notify_one();
    });

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(form.phase(), FormPhase::Closed);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_reopen_in_create_mode_starts_blank() {
    let store = Arc::new(MemoryRemoteStore::with_demo_data().unwrap());
    let (form, _notifier) = controller::<JurusanSchema>(&store);
    let data: crate::models::ScreenData<crate::models::jurusan::entities::Jurusan> =
        crate::gateway::load_screen_data(store.as_ref(), EntityKind::Jurusan)
            .await
            .unwrap();
    let rpl = data.records.into_iter().find(|r| r.id == 3).unwrap();

    form.open(Some(rpl));
    assert_eq!(form.draft().kode_jurusan, "RPL");
    form.close();

    form.open(None);
    assert_eq!(form.mode(), FormMode::Create);
    assert_eq!(form.draft().kode_jurusan, "");
    assert!(form.selected().is_none());
}

#[tokio::test]
async fn test_code_uppercased_per_keystroke() {
    let store = Arc::new(MemoryRemoteStore::new());
    let (form, _notifier) = controller::<JurusanSchema>(&store);
    form.open(None);

    form.change_field_by_name("kode_jurusan", "r").unwrap();
    assert_eq!(form.draft().kode_jurusan, "R");
    form.change_field_by_name("kode_jurusan", "rpl").unwrap();
    assert_eq!(form.draft().kode_jurusan, "RPL");

    let err = form.change_field_by_name("kode", "x").unwrap_err();
    assert_eq!(err.code(), "E010");
    let err = form
        .change_field(JurusanField::NamaJurusan, true)
        .unwrap_err();
    assert_eq!(err.code(), "E005");
}

#[tokio::test]
async fn test_remote_failure_keeps_draft_open() {
    let store = Arc::new(MemoryRemoteStore::new());
    let mut remote_errors = std::collections::BTreeMap::new();
    remote_errors.insert(
        "kode_jurusan".to_string(),
        vec!["Kode jurusan sudah digunakan".to_string()],
    );
    store.fail_next(RemoteFailure::rejected(422, "invalid", remote_errors));
    let (form, notifier) = controller::<JurusanSchema>(&store);

    form.open(None);
    form.change_field(JurusanField::KodeJurusan, "rpl").unwrap();
    form.change_field(JurusanField::NamaJurusan, "Rekayasa Perangkat Lunak")
        .unwrap();

    let outcome = form.submit().await;
    assert!(matches!(&outcome, SubmitOutcome::Failed(f) if f.is_validation()));
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().kode_jurusan, "RPL");
    // Remote field errors do not become inline errors
    assert!(form.errors().is_empty());

    let toasts = notifier.take();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert_eq!(toasts[0].message, "Gagal menambahkan Jurusan");

    // The user may retry immediately
    assert_eq!(form.submit().await, SubmitOutcome::Saved);
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn test_closed_form_ignores_input() {
    let store = Arc::new(MemoryRemoteStore::new());
    let (form, _notifier) = controller::<JurusanSchema>(&store);

    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(
        form.change_field(JurusanField::KodeJurusan, "RPL")
            .unwrap_err()
            .code(),
        "E009"
    );
    assert_eq!(form.submit().await, SubmitOutcome::Ignored);
    assert!(store.calls().is_empty());
}

#[test]
fn test_errors_by_name_uses_wire_names() {
    let mut errors = FieldErrors::new();
    errors.insert(JurusanField::KodeJurusan, "Kode Jurusan wajib diisi".to_string());
    let named = errors_by_name(&errors);
    assert_eq!(named["kode_jurusan"], "Kode Jurusan wajib diisi");
}
