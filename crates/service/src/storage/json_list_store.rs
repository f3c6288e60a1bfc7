use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::{fs, sync::Mutex};

use crate::errors::ServiceError;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generic JSON file-backed list store.
///
/// The file holds one JSON array and is the only source of truth: every call
/// re-reads it, nothing is cached between calls. Mutations run a full
/// read-modify-write cycle under a per-store mutex, so writers in this process
/// never interleave. Writers in other processes still race (last one wins).
pub struct JsonListStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _item: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Send,
{
    /// Initialize the store from a path. Creates the file with an empty list if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| storage_err(parent, e))?;
        }

        let store = Self { file_path, write_lock: Mutex::new(()), _item: PhantomData };
        if fs::metadata(&store.file_path).await.is_err() {
            store.save(&[]).await?;
            tracing::info!(path = %store.file_path.display(), "created empty collection file");
        }
        Ok(Arc::new(store))
    }

    async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| storage_err(&self.file_path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| storage_err(&self.file_path, e))
    }

    /// Pretty-print (two-space indent) to a sibling temp file, then rename it
    /// over the target.
    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(|e| storage_err(&self.file_path, e))?;
        let tmp = self.tmp_path();
        let written: std::io::Result<()> = async {
            fs::write(&tmp, data).await?;
            fs::rename(&tmp, &self.file_path).await
        }
        .await;
        if let Err(e) = written {
            // no partial temp file left behind
            let _ = fs::remove_file(&tmp).await;
            return Err(storage_err(&self.file_path, e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self.file_path.file_name().and_then(|s| s.to_str()).unwrap_or("store");
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.file_path.with_file_name(format!(".{name}.tmp.{}.{seq}", std::process::id()))
    }

    /// Every element, in stored order.
    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        self.load().await
    }

    /// Load the list, apply `f`, and write the whole list back.
    ///
    /// The list is written even when `f` leaves it unchanged. If `f` fails
    /// nothing is written.
    pub async fn update_list<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }
}

fn storage_err(path: &Path, e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Storage(format!("{}: {e}", path.display()))
}
