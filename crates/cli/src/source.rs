use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use patternpal_compute::{DesignFile, DesignFileSource};
use patternpal_core::{PatternError, Result};

/// Design files cached on disk as `{dir}/{file_key}.json`.
pub struct FsDesignFileSource {
    dir: PathBuf,
}

impl FsDesignFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, file_key: &str) -> Result<PathBuf> {
        if file_key.is_empty() || !file_key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PatternError::InvalidInput(format!("bad file key: '{}'", file_key)));
        }
        Ok(self.dir.join(format!("{}.json", file_key)))
    }
}

#[async_trait]
impl DesignFileSource for FsDesignFileSource {
    async fn fetch_file(&self, file_key: &str) -> Result<DesignFile> {
        let path = self.path_for(file_key)?;
        debug!(path = %path.display(), "Reading cached design file");
        let raw = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
