use async_trait::async_trait;

use crate::StoreError;

/// Maps (project, script name) to script content.
///
/// Every call hits the backing storage; nothing is cached, so a write is visible to the next
/// `list`/`read` immediately.
#[async_trait]
pub trait ScriptStore: std::fmt::Debug + Send + Sync {
    /// Names of the scripts stored in the project's own directory, sorted.
    /// A project without a directory has no scripts.
    /// # Errors
    /// Returns error if the directory exists but cannot be listed.
    async fn list(&self, project_id: &str) -> Result<Vec<String>, StoreError>;

    /// # Errors
    /// Returns error if the name is invalid or the file cannot be read.
    async fn read(&self, project_id: &str, name: &str) -> Result<Option<String>, StoreError>;

    /// Creates or overwrites a script, creating the project directory when needed.
    /// # Errors
    /// Returns error if the name is invalid or the file cannot be written.
    async fn write(&self, project_id: &str, name: &str, content: &str) -> Result<(), StoreError>;

    /// Removes a script, returning whether a file was removed.
    /// # Errors
    /// Returns error if the name is invalid or the file exists but cannot be removed.
    async fn delete(&self, project_id: &str, name: &str) -> Result<bool, StoreError>;

    /// Copies every script of `source` into `target`, returning the number of files copied.
    /// Failures on single files are logged and skipped.
    /// # Errors
    /// Returns error if the source cannot be listed or the target directory cannot be created.
    async fn copy_all(&self, source_id: &str, target_id: &str) -> Result<usize, StoreError>;
}
