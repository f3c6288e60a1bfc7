//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the data file's directory exists; warn when the optional static
/// directory is configured but missing.
pub async fn ensure_env(data_file: &Path, static_dir: Option<&Path>) -> anyhow::Result<()> {
    if let Some(dir) = static_dir {
        if tokio::fs::metadata(dir).await.is_err() {
            warn!(static_dir = %dir.display(), "static assets directory not found; static requests will 404");
        }
    }
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_env_creates_data_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("common_env_{}", uuid::Uuid::new_v4()));
        let data_file = root.join("nested").join("todos.json");
        ensure_env(&data_file, Some(&root.join("missing-static"))).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn ensure_env_accepts_bare_file_name() -> anyhow::Result<()> {
        ensure_env(Path::new("todos.json"), None).await?;
        Ok(())
    }
}
