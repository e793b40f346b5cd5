use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::loader::{load_file, DataLoadError};
use super::model::SalaryDataset;

// ---------------------------------------------------------------------------
// Once-initialised dataset handle
// ---------------------------------------------------------------------------

/// Holds the dataset after its first successful load.
///
/// Lifecycle:
/// * empty until [`DatasetCache::get_or_load`] succeeds once
/// * never invalidated afterwards; the source is not read again, whatever
///   path later callers pass
/// * a failed load leaves the cache empty so the next call retries
pub struct DatasetCache {
    slot: OnceLock<(PathBuf, SalaryDataset)>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the cached dataset, loading it from `path` on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<&SalaryDataset, DataLoadError> {
        if let Some((_, ds)) = self.slot.get() {
            return Ok(ds);
        }
        let dataset = load_file(path)?;
        log::info!(
            "Loaded {} salary records from {} with columns {:?}",
            dataset.len(),
            path.display(),
            dataset.column_names
        );
        // A concurrent initialiser may have won; its dataset is kept and ours dropped.
        let (_, ds) = self.slot.get_or_init(|| (path.to_path_buf(), dataset));
        Ok(ds)
    }

    /// The cached dataset, if it has been loaded.
    pub fn get(&self) -> Option<&SalaryDataset> {
        self.slot.get().map(|(_, ds)| ds)
    }

    /// Path the cached dataset was read from.
    pub fn source(&self) -> Option<&Path> {
        self.slot.get().map(|(p, _)| p.as_path())
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED: DatasetCache = DatasetCache::new();

/// Process-wide dataset, loaded from `path` on first access.
pub fn shared_dataset(path: &Path) -> Result<&'static SalaryDataset, DataLoadError> {
    SHARED.get_or_load(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn second_access_does_not_reread_source() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "year,pos,salary\n1991,OF,100000").unwrap();
        let path = file.path().to_path_buf();

        let cache = DatasetCache::new();
        assert!(cache.get().is_none());
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);

        drop(file);
        assert!(!path.exists());

        let again = cache.get_or_load(&path).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(cache.source(), Some(path.as_path()));
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let cache = DatasetCache::new();
        assert!(cache
            .get_or_load(Path::new("/nonexistent/salaries.csv"))
            .is_err());
        assert!(cache.get().is_none());
    }
}
