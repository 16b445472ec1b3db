//! Orientation consent remembered on disk

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tessera_core::ConsentStore;

#[derive(Debug, Serialize, Deserialize)]
struct ConsentRecord {
    orientation_granted: bool,
}

/// Stores the permission answer as a small RON file
#[derive(Debug, Clone)]
pub struct FileConsentStore {
    path: PathBuf,
}

impl FileConsentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConsentStore for FileConsentStore {
    fn load(&self) -> Option<bool> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match ron::from_str::<ConsentRecord>(&contents) {
            Ok(record) => Some(record.orientation_granted),
            Err(e) => {
                log::warn!("Ignoring unreadable consent file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn store(&mut self, granted: bool) {
        let record = ConsentRecord {
            orientation_granted: granted,
        };
        let result = ron::ser::to_string_pretty(&record, ron::ser::PrettyConfig::new().struct_names(true))
            .map_err(|e| e.to_string())
            .and_then(|text| {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent).map_err(|e| e.to_string())?;
                }
                fs::write(&self.path, text).map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            log::warn!("Failed to save consent to {}: {}", self.path.display(), e);
        }
    }
}
