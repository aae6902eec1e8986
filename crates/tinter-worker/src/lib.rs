//! Tinter Worker: runs named filters off the caller's thread.
//!
//! A [`FilterWorker`] owns a dedicated thread fed by a bounded queue. Hosts
//! send a [`FilterRequest`] (or its JSON form) and await a [`FilterResponse`]
//! carrying either the filtered image or an error message. Undo state lives
//! in a caller-owned [`BackupStore`], usually through a [`FilterSession`].

pub mod backup;
pub mod boundary;
pub mod config;
pub mod error;
pub mod messages;
pub mod session;
pub mod worker;

pub use backup::BackupStore;
pub use boundary::{handle_json, handle_request};
pub use config::{WorkerConfig, load_filter_table};
pub use error::WorkerError;
pub use messages::{FilterOutcome, FilterRequest, FilterResponse, WireBuffer};
pub use session::FilterSession;
pub use worker::FilterWorker;
