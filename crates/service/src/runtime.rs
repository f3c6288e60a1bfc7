//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the data directory exists; warn on a missing static directory.
pub async fn ensure_env(data_file: &Path, static_dir: Option<&Path>) -> anyhow::Result<()> {
    common::env::ensure_env(data_file, static_dir).await
}
