//! # Filmoteca Architecture
//!
//! Filmoteca is a library that manages a personal movie catalog kept in a
//! flat CSV file; the CLI is a thin client on top of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI layer (main.rs, args.rs)                               │
//! │  - Argument parsing, interactive prompts, colored output    │
//! │  - The ONLY place touching stdout/stderr/exit codes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes raw input (rating strings, optional dates)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command layer (commands/*.rs)                              │
//! │  - The mutation state machine:                              │
//! │    validate → dry-run? → snapshot → write → report          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage layer (store/)                                     │
//! │  - CatalogStore trait                                       │
//! │  - FileStore (production), MemoryStore (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The two identifier schemes
//!
//! The catalog file has existed in two shapes. The legacy 12-column layout
//! keeps a gapless numeric id in column 0 which must be renumbered when rows
//! are deleted; the current 11-column layout leads with the IMDb const,
//! which may repeat and is never renumbered. [`model::Schema`] selects the
//! layout once per invocation and [`ident`] implements both strategies.
//!
//! ## Backups
//!
//! [`backup::BackupManager`] is orthogonal to the mutation path: it
//! snapshots, lists, diffs, restores and deletes timestamped copies of the
//! catalog file. Every mutating command also snapshots through its store
//! before writing, unless told not to.
//!
//! ## Module overview
//!
//! - [`api`]: the facade front ends talk to
//! - [`commands`]: add / delete / rate business logic
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: `Record` and the two `Schema` layouts
//! - [`ident`]: identifier allocation and delete-time reindexing
//! - [`backup`]: snapshot lifecycle
//! - [`config`]: per-catalog settings file
//! - [`validate`]: pure field validators shared by prompts and flags
//! - [`error`]: error types

pub mod api;
pub mod backup;
pub mod commands;
pub mod config;
pub mod error;
pub mod ident;
pub mod model;
pub mod store;
pub mod validate;
