use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

use super::register::{BoxedRemoteBackendFuture, RemoteBackendConstructor};
use super::{
    IndexSource, MutationGateway, MutationIntent, MutationOutcome, RemoteBackend, RemoteFailure,
};
use crate::config::RemoteConfig;
use crate::errors::{AdminError, Result};
use crate::models::{EntityKind, ForeignOptions, SelectOption, SummaryStats};

pub const BACKEND_NAME: &str = "memory";

pub(super) fn constructor() -> RemoteBackendConstructor {
    Arc::new(|_config: RemoteConfig| -> BoxedRemoteBackendFuture {
        Box::pin(async move {
            let store = MemoryRemoteStore::with_demo_data()?;
            Ok::<_, AdminError>(RemoteBackend::from_shared(Arc::new(store)))
        })
    })
}

/// One mutation received by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: EntityKind,
    pub intent: MutationIntent,
    pub payload: Value,
}

/// In-process stand-in for the remote store.
///
/// Assigns identities, keeps derived counts up to date and pre-aggregates
/// the stats counters the same way the real store does. Every mutation is
/// recorded, and failures can be queued to exercise the error path.
#[derive(Default)]
pub struct MemoryRemoteStore {
    collections: RwLock<HashMap<EntityKind, Vec<Value>>>,
    options: RwLock<ForeignOptions>,
    next_id: AtomicI64,
    calls: Mutex<Vec<RecordedCall>>,
    pending_failures: Mutex<VecDeque<RemoteFailure>>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// A small data set so the view server is usable without a backend.
    pub fn with_demo_data() -> Result<Self> {
        let store = Self::new();
        store.seed(
            EntityKind::TahunAjaran,
            vec![
                json!({"id": 1, "nama_tahun_ajaran": "2023/2024", "tanggal_mulai": "2023-07-17",
                       "tanggal_selesai": "2024-06-28", "status_aktif": false}),
                json!({"id": 2, "nama_tahun_ajaran": "2024/2025", "tanggal_mulai": "2024-07-15",
                       "tanggal_selesai": "2025-06-27", "status_aktif": true}),
            ],
        )?;
        store.seed(
            EntityKind::Jurusan,
            vec![
                json!({
                    "id": 3,
                    "kode_jurusan": "RPL",
                    "nama_jurusan": "Rekayasa Perangkat Lunak",
                    "deskripsi": null
                }),
                json!({
                    "id": 4,
                    "kode_jurusan": "TKJ",
                    "nama_jurusan": "Teknik Komputer dan Jaringan",
                    "deskripsi": "Jaringan dan infrastruktur"
                }),
            ],
        )?;
        store.seed(
            EntityKind::Kelas,
            vec![json!({"id": 5, "jurusan_id": 3, "tahun_ajaran_id": 2, "nama_kelas": "X RPL 1",
                        "tingkat": 1, "wali_kelas_id": null, "siswa_count": 32})],
        )?;
        store.seed(
            EntityKind::Semester,
            vec![json!({"id": 6, "tahun_ajaran_id": 2, "nama_semester": "Ganjil",
                        "tanggal_mulai": "2024-07-15", "tanggal_selesai": "2024-12-20",
                        "status_aktif": true})],
        )?;
        store.set_options(
            "wali_kelas",
            vec![
                SelectOption::new(101, "Siti Rahmawati, S.Pd."),
                SelectOption::new(102, "Budi Santoso, S.Kom."),
            ],
        );
        Ok(store)
    }

    /// Inserts records as the store holds them. Each record must carry an `id`.
    pub fn seed(&self, kind: EntityKind, records: Vec<Value>) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .expect("Memory store lock poisoned");
        let collection = collections.entry(kind).or_default();
        for record in records {
            let id = record
                .get("id")
                .and_then(Value::as_i64)
                .ok_or_else(|| AdminError::validation(format!("{kind} seed record without id")))?;
            self.next_id.fetch_max(id + 1, Ordering::SeqCst);
            collection.push(record);
        }
        Ok(())
    }

    /// Typed variant of [`seed`](Self::seed).
    pub fn seed_records<T: Serialize>(&self, kind: EntityKind, records: &[T]) -> Result<()> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.seed(kind, values)
    }

    /// Overrides a selector's options. Selectors backed by a collection
    /// (`jurusan`, `tahun_ajaran`) are derived from it unless overridden.
    pub fn set_options(&self, name: &str, options: Vec<SelectOption>) {
        self.options
            .write()
            .expect("Memory store lock poisoned")
            .insert(name.to_string(), options);
    }

    /// The next mutation fails with `failure` instead of being applied.
    pub fn fail_next(&self, failure: RemoteFailure) {
        self.pending_failures
            .lock()
            .expect("Memory store lock poisoned")
            .push_back(failure);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("Memory store lock poisoned").clone()
    }

    pub fn records(&self, kind: EntityKind) -> Vec<Value> {
        let mut collections = self
            .collections
            .write()
            .expect("Memory store lock poisoned");
        refresh_derived_counts(&mut collections);
        collections.get(&kind).cloned().unwrap_or_default()
    }

    fn record_call(
        &self,
        kind: EntityKind,
        intent: MutationIntent,
        payload: &Value,
    ) -> MutationOutcome {
        self.calls
            .lock()
            .expect("Memory store lock poisoned")
            .push(RecordedCall {
                kind,
                intent,
                payload: payload.clone(),
            });
        match self
            .pending_failures
            .lock()
            .expect("Memory store lock poisoned")
            .pop_front()
        {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn options_for(
        &self,
        kind: EntityKind,
        collections: &HashMap<EntityKind, Vec<Value>>,
    ) -> ForeignOptions {
        let overrides = self.options.read().expect("Memory store lock poisoned");
        let mut options = ForeignOptions::new();
        let wanted: &[&str] = match kind {
            EntityKind::Kelas => &["jurusan", "tahun_ajaran", "wali_kelas"],
            EntityKind::Semester => &["tahun_ajaran"],
            EntityKind::Jurusan | EntityKind::TahunAjaran => &[],
        };
        for name in wanted {
            let list = match overrides.get(*name) {
                Some(list) => list.clone(),
                None => derived_options(name, collections),
            };
            options.insert(name.to_string(), list);
        }
        options
    }
}

fn derived_options(name: &str, collections: &HashMap<EntityKind, Vec<Value>>) -> Vec<SelectOption> {
    let (kind, label_field) = match name {
        "jurusan" => (EntityKind::Jurusan, "nama_jurusan"),
        "tahun_ajaran" => (EntityKind::TahunAjaran, "nama_tahun_ajaran"),
        _ => return Vec::new(),
    };
    collections
        .get(&kind)
        .map(|records| {
            records
                .iter()
                .filter_map(|record| {
                    let id = record.get("id")?.as_i64()?;
                    let label = record.get(label_field)?.as_str()?;
                    Some(SelectOption::new(id, label))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn count_children(children: Option<&Vec<Value>>, key: &str, id: i64) -> i64 {
    children
        .map(|records| {
            records
                .iter()
                .filter(|record| record.get(key).and_then(Value::as_i64) == Some(id))
                .count() as i64
        })
        .unwrap_or(0)
}

/// Recomputes `kelas_count` and `semester_count` from the child collections.
fn refresh_derived_counts(collections: &mut HashMap<EntityKind, Vec<Value>>) {
    let kelas = collections.get(&EntityKind::Kelas).cloned();
    let semester = collections.get(&EntityKind::Semester).cloned();

    if let Some(jurusan) = collections.get_mut(&EntityKind::Jurusan) {
        for record in jurusan.iter_mut() {
            let id = record.get("id").and_then(Value::as_i64).unwrap_or_default();
            record["kelas_count"] = json!(count_children(kelas.as_ref(), "jurusan_id", id));
        }
    }
    if let Some(tahun_ajaran) = collections.get_mut(&EntityKind::TahunAjaran) {
        for record in tahun_ajaran.iter_mut() {
            let id = record.get("id").and_then(Value::as_i64).unwrap_or_default();
            record["semester_count"] =
                json!(count_children(semester.as_ref(), "tahun_ajaran_id", id));
        }
    }
    if let Some(kelas) = collections.get_mut(&EntityKind::Kelas) {
        for record in kelas.iter_mut() {
            if record.get("siswa_count").is_none() {
                record["siswa_count"] = json!(0);
            }
        }
    }
}

fn label_of(options: &[SelectOption], id: Option<i64>) -> Value {
    id.and_then(|id| options.iter().find(|option| option.id == id))
        .map(|option| json!(option.label))
        .unwrap_or(Value::Null)
}

/// Fills the display projections (`jurusan`, `tahun_ajaran`, `wali_kelas`)
/// the real store joins onto kelas and semester records.
fn resolve_display_names(
    collections: &mut HashMap<EntityKind, Vec<Value>>,
    wali_kelas: &[SelectOption],
) {
    let jurusan = derived_options("jurusan", collections);
    let tahun_ajaran = derived_options("tahun_ajaran", collections);
    fn id_of(record: &Value, key: &str) -> Option<i64> {
        record.get(key).and_then(Value::as_i64)
    }

    if let Some(kelas) = collections.get_mut(&EntityKind::Kelas) {
        for record in kelas.iter_mut() {
            let names = [
                ("jurusan", label_of(&jurusan, id_of(record, "jurusan_id"))),
                ("tahun_ajaran", label_of(&tahun_ajaran, id_of(record, "tahun_ajaran_id"))),
                ("wali_kelas", label_of(wali_kelas, id_of(record, "wali_kelas_id"))),
            ];
            for (key, name) in names {
                record[key] = name;
            }
        }
    }
    if let Some(semester) = collections.get_mut(&EntityKind::Semester) {
        for record in semester.iter_mut() {
            let name = label_of(&tahun_ajaran, id_of(record, "tahun_ajaran_id"));
            record["tahun_ajaran"] = name;
        }
    }
}

fn summarize(kind: EntityKind, records: &[Value]) -> SummaryStats {
    let positive = records
        .iter()
        .filter(|record| {
            let flag = |key: &str| record.get(key).and_then(Value::as_bool).unwrap_or(false);
            let count = |key: &str| record.get(key).and_then(Value::as_i64).unwrap_or(0);
            match kind {
                EntityKind::Jurusan => count("kelas_count") > 0,
                EntityKind::Kelas => count("siswa_count") > 0,
                EntityKind::Semester | EntityKind::TahunAjaran => flag("status_aktif"),
            }
        })
        .count() as i64;
    let total = records.len() as i64;
    SummaryStats {
        total,
        positive,
        negative: total - positive,
    }
}

#[async_trait]
impl MutationGateway for MemoryRemoteStore {
    async fn create(&self, kind: EntityKind, payload: Value) -> MutationOutcome {
        self.record_call(kind, MutationIntent::Create, &payload)?;

        let Value::Object(mut record) = payload else {
            return Err(RemoteFailure::rejected(
                400,
                "Payload must be an object",
                Default::default(),
            ));
        };
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.insert("id".to_string(), json!(id));

        let mut collections = self
            .collections
            .write()
            .expect("Memory store lock poisoned");
        collections.entry(kind).or_default().push(Value::Object(record));
        refresh_derived_counts(&mut collections);
        debug!("Memory store created {} #{}", kind, id);
        Ok(())
    }

    async fn update(&self, kind: EntityKind, id: i64, payload: Value) -> MutationOutcome {
        self.record_call(kind, MutationIntent::Update { id }, &payload)?;

        let Value::Object(fields) = payload else {
            return Err(RemoteFailure::rejected(
                400,
                "Payload must be an object",
                Default::default(),
            ));
        };

        let mut collections = self
            .collections
            .write()
            .expect("Memory store lock poisoned");
        let record = collections
            .get_mut(&kind)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|record| record.get("id").and_then(Value::as_i64) == Some(id))
            })
            .ok_or_else(|| {
                RemoteFailure::rejected(404, format!("{kind} {id} not found"), Default::default())
            })?;
        for (key, value) in fields {
            // Identity is owned by the store.
            if key != "id" {
                record[key.as_str()] = value;
            }
        }
        refresh_derived_counts(&mut collections);
        debug!("Memory store updated {} #{}", kind, id);
        Ok(())
    }
}

#[async_trait]
impl IndexSource for MemoryRemoteStore {
    async fn fetch_index(&self, kind: EntityKind) -> Result<Value> {
        let mut collections = self
            .collections
            .write()
            .expect("Memory store lock poisoned");
        refresh_derived_counts(&mut collections);
        let wali_kelas = self
            .options
            .read()
            .expect("Memory store lock poisoned")
            .get("wali_kelas")
            .cloned()
            .unwrap_or_default();
        resolve_display_names(&mut collections, &wali_kelas);
        let records = collections.get(&kind).cloned().unwrap_or_default();
        let stats = summarize(kind, &records);
        let options = self.options_for(kind, &collections);
        Ok(json!({
            "records": records,
            "stats": stats,
            "options": options,
        }))
    }
}
