use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use initscripts_core::plugin::PLUGIN_NAME;
use tokio::fs::{copy, create_dir_all, metadata, read_dir, read_to_string, remove_file, write};

use crate::{ScriptStore, StoreError, validate_script_name};

/// Scripts stored as plain files under `<root>/<project id>/gradleInitScripts`.
#[derive(Debug, Clone)]
pub struct FsScriptStore {
    root: PathBuf,
}

impl FsScriptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self, project_id: &str) -> PathBuf {
        self.root.join(project_id).join(PLUGIN_NAME)
    }

    fn script_path(&self, project_id: &str, name: &str) -> Result<PathBuf, StoreError> {
        validate_script_name(name)?;
        Ok(self.project_dir(project_id).join(name))
    }
}

/// Regular files directly inside `dir`, sorted by name; `None` when `dir` does not exist.
async fn list_files(dir: &Path) -> Result<Option<Vec<(String, PathBuf)>>, StoreError> {
    let mut entries = match read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io("list", dir, e)),
    };
    let mut files = vec![];
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StoreError::io("list", dir, e))?
    {
        // Follows symlinks, as `read` does.
        match metadata(entry.path()).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(StoreError::io("list", entry.path(), e)),
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push((name, entry.path())),
            Err(name) => {
                tracing::debug!(file = ?name, "Skipping script with a non UTF-8 file name");
            }
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Some(files))
}

#[async_trait]
impl ScriptStore for FsScriptStore {
    async fn list(&self, project_id: &str) -> Result<Vec<String>, StoreError> {
        let files = list_files(&self.project_dir(project_id)).await?;
        Ok(files
            .unwrap_or_default()
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    async fn read(&self, project_id: &str, name: &str) -> Result<Option<String>, StoreError> {
        let path = self.script_path(project_id, name)?;
        match read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io("read", path, e)),
        }
    }

    async fn write(&self, project_id: &str, name: &str, content: &str) -> Result<(), StoreError> {
        let path = self.script_path(project_id, name)?;
        let dir = self.project_dir(project_id);
        create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io("create", &dir, e))?;
        write(&path, content)
            .await
            .map_err(|e| StoreError::io("write", path, e))
    }

    async fn delete(&self, project_id: &str, name: &str) -> Result<bool, StoreError> {
        let path = self.script_path(project_id, name)?;
        match remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io("delete", path, e)),
        }
    }

    async fn copy_all(&self, source_id: &str, target_id: &str) -> Result<usize, StoreError> {
        let files = match list_files(&self.project_dir(source_id)).await? {
            Some(files) if !files.is_empty() => files,
            _ => return Ok(0),
        };
        let target_dir = self.project_dir(target_id);
        create_dir_all(&target_dir)
            .await
            .map_err(|e| StoreError::io("create", &target_dir, e))?;

        let mut copied = 0;
        for (name, source_file) in files {
            let target_file = target_dir.join(&name);
            match copy(&source_file, &target_file).await {
                Ok(_) => copied += 1,
                Err(e) => tracing::warn!(
                    source = %source_file.display(),
                    target = %target_file.display(),
                    error = %e,
                    "Could not copy script file"
                ),
            }
        }
        Ok(copied)
    }
}
