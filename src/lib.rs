//! Sekolah Admin - view layer for school academic reference data
//!
//! Administrative screens for Jurusan, Kelas, Semester and Tahun Ajaran,
//! served as JSON view models by an Actix Web server in front of a remote
//! data store.
//!
//! # Architecture
//! - `config`: configuration management
//! - `errors`: unified error handling
//! - `forms`: form state controller and per-entity schemas
//! - `gateway`: remote store boundary (HTTP and in-memory backends)
//! - `models`: entities, drafts, payloads and response types
//! - `notify`: toast notifications
//! - `routes`: HTTP routes
//! - `runtime`: startup and shutdown
//! - `screens`: per-entity screen composition
//! - `services`: request handling
//! - `table`: generic searchable, sortable, paginated table
//! - `utils`: validation and extractor error handlers

pub mod config;
pub mod errors;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod routes;
pub mod runtime;
pub mod screens;
pub mod services;
pub mod table;
pub mod utils;
