//! Service layer: the file-backed todo store and its supporting pieces.
//! - `storage` holds the generic JSON-array file store.
//! - `file` adapts it to todos; `todos` defines the store trait handlers use.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod runtime;
pub mod observability;
pub mod storage;
pub mod file;
pub mod todos;
