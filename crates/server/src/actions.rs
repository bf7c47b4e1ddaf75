use initscripts_core::ProjectTree;
use initscripts_store::StoreError;
use thiserror::Error;

use crate::GradleScriptsManager;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("File name must be provided")]
    FileNameMissing,
    #[error("Cannot upload file. Project is missing")]
    ProjectMissing,
    #[error("No file set")]
    NoFile,
    #[error("File {0} is not a UTF-8 text file")]
    NotText(String),
    #[error("File {name} cannot be deleted. Project {project_id} was not found")]
    DeleteProjectNotFound { name: String, project_id: String },
    #[error("Gradle init script {name} cannot be deleted.")]
    DeleteFailed {
        name: String,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An uploaded file, as submitted from the project page.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// External id of the project receiving the file.
    pub project: String,
    pub file_name: Option<String>,
    pub content: Option<Vec<u8>>,
}

/// Admin actions changing the scripts of a project.
#[derive(Debug, Clone)]
pub struct ScriptActions {
    manager: GradleScriptsManager,
}

impl ScriptActions {
    pub fn new(manager: GradleScriptsManager) -> Self {
        Self { manager }
    }

    /// Stores an uploaded file in the project's own directory, replacing any file with the same
    /// name.
    ///
    /// # Errors
    /// Returns error if the request is incomplete, the project is unknown or the file cannot be
    /// written. Nothing is written in that case.
    pub async fn upload(&self, tree: &ProjectTree, request: UploadRequest) -> Result<(), ActionError> {
        let file_name = match request.file_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ActionError::FileNameMissing),
        };
        let project = tree
            .project_by_external_id(&request.project)
            .ok_or(ActionError::ProjectMissing)?;
        let content = request.content.ok_or(ActionError::NoFile)?;
        let content =
            String::from_utf8(content).map_err(|_| ActionError::NotText(file_name.clone()))?;

        self.manager.save_script(project, &file_name, &content).await?;
        tracing::info!(project = project.id(), script = file_name.as_str(), "Uploaded init script");
        Ok(())
    }

    /// Deletes a script of `project_id` and returns the message shown to the user.
    ///
    /// # Errors
    /// Returns error if the project is unknown or the file cannot be removed.
    pub async fn delete(
        &self,
        tree: &ProjectTree,
        project_id: &str,
        name: &str,
    ) -> Result<String, ActionError> {
        let project = tree
            .project(project_id)
            .ok_or_else(|| ActionError::DeleteProjectNotFound {
                name: name.to_string(),
                project_id: project_id.to_string(),
            })?;
        let deleted = self
            .manager
            .delete_script(project, name)
            .await
            .map_err(|source| ActionError::DeleteFailed {
                name: name.to_string(),
                source,
            })?;
        Ok(format!(
            "Gradle init script {name} {}",
            if deleted {
                "was deleted"
            } else {
                "has been scheduled for deletion"
            }
        ))
    }
}
