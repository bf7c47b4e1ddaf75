use std::{
    collections::HashMap,
    fmt::Display,
    hash::{Hash, Hasher},
    ops::Deref,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{BuildSettings, SettingsKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate project id '{0}'")]
    DuplicateProject(String),
    #[error("project '{project}' refers to unknown parent '{parent}'")]
    UnknownParent { project: String, parent: String },
    #[error("project '{0}' is part of a parent cycle")]
    Cycle(String),
}

/// One project as supplied by the host.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub build_types: Vec<BuildSettings>,
    #[serde(default)]
    pub templates: Vec<BuildSettings>,
}

impl ProjectNode {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    #[must_use]
    pub fn with_build_type(mut self, settings: BuildSettings) -> Self {
        self.build_types.push(settings);
        self
    }

    #[must_use]
    pub fn with_template(mut self, settings: BuildSettings) -> Self {
        self.templates.push(settings);
        self
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectTreeFile {
    projects: Vec<ProjectNode>,
}

/// Host-owned project hierarchy.
///
/// Nodes are stored in an arena and addressed through [`ProjectRef`] handles, so
/// traversals borrow the tree instead of copying projects around. Serialized as
/// `{"projects": [...]}` with each project naming its parent by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProjectTreeFile", into = "ProjectTreeFile")]
pub struct ProjectTree {
    nodes: Vec<ProjectNode>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    by_id: HashMap<String, usize>,
}

impl ProjectTree {
    /// # Errors
    /// Returns error if ids are duplicated, a parent is unknown or parents form a cycle.
    pub fn new(nodes: Vec<ProjectNode>) -> Result<Self, TreeError> {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if by_id.insert(node.id.clone(), index).is_some() {
                return Err(TreeError::DuplicateProject(node.id.clone()));
            }
        }

        let mut parents = Vec::with_capacity(nodes.len());
        let mut children = vec![Vec::new(); nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            let parent = match &node.parent {
                Some(parent_id) => {
                    let parent_index =
                        *by_id
                            .get(parent_id)
                            .ok_or_else(|| TreeError::UnknownParent {
                                project: node.id.clone(),
                                parent: parent_id.clone(),
                            })?;
                    children[parent_index].push(index);
                    Some(parent_index)
                }
                None => None,
            };
            parents.push(parent);
        }

        for (index, node) in nodes.iter().enumerate() {
            let mut current = parents[index];
            let mut steps = 0;
            while let Some(parent_index) = current {
                steps += 1;
                if steps > nodes.len() {
                    return Err(TreeError::Cycle(node.id.clone()));
                }
                current = parents[parent_index];
            }
        }

        Ok(Self {
            nodes,
            parents,
            children,
            by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn project(&self, id: &str) -> Option<ProjectRef<'_>> {
        self.by_id
            .get(id)
            .map(|&index| ProjectRef { tree: self, index })
    }

    /// Looks a project up by external id, falling back to the internal id.
    pub fn project_by_external_id(&self, external_id: &str) -> Option<ProjectRef<'_>> {
        self.projects()
            .find(|project| project.external_id() == external_id)
            .or_else(|| self.project(external_id))
    }

    pub fn projects(&self) -> impl Iterator<Item = ProjectRef<'_>> {
        (0..self.nodes.len()).map(move |index| ProjectRef { tree: self, index })
    }

    pub fn build_types(&self) -> impl Iterator<Item = SettingsRef<'_>> {
        self.projects().flat_map(ProjectRef::own_build_types)
    }

    pub fn templates(&self) -> impl Iterator<Item = SettingsRef<'_>> {
        self.projects().flat_map(ProjectRef::own_templates)
    }

    /// Finds a build configuration or template by id.
    pub fn settings(&self, id: &str) -> Option<SettingsRef<'_>> {
        self.projects()
            .flat_map(ProjectRef::own_settings)
            .find(|settings| settings.id == id)
    }
}

impl TryFrom<ProjectTreeFile> for ProjectTree {
    type Error = TreeError;

    fn try_from(value: ProjectTreeFile) -> Result<Self, Self::Error> {
        Self::new(value.projects)
    }
}

impl From<ProjectTree> for ProjectTreeFile {
    fn from(value: ProjectTree) -> Self {
        Self {
            projects: value.nodes,
        }
    }
}

/// Borrowed handle on one project of a [`ProjectTree`].
#[derive(Clone, Copy)]
pub struct ProjectRef<'a> {
    tree: &'a ProjectTree,
    index: usize,
}

impl<'a> ProjectRef<'a> {
    fn node(self) -> &'a ProjectNode {
        &self.tree.nodes[self.index]
    }

    pub fn id(self) -> &'a str {
        &self.node().id
    }

    pub fn external_id(self) -> &'a str {
        self.node().external_id.as_deref().unwrap_or(self.id())
    }

    pub fn name(self) -> &'a str {
        self.node().name.as_deref().unwrap_or(self.id())
    }

    pub fn parent(self) -> Option<ProjectRef<'a>> {
        self.tree.parents[self.index].map(|index| ProjectRef {
            tree: self.tree,
            index,
        })
    }

    pub fn children(self) -> impl Iterator<Item = ProjectRef<'a>> + 'a {
        let tree = self.tree;
        tree.children[self.index]
            .iter()
            .map(move |&index| ProjectRef { tree, index })
    }

    /// Ancestor chain starting at this project and ending at the root.
    pub fn self_to_root(self) -> impl Iterator<Item = ProjectRef<'a>> + 'a {
        std::iter::successors(Some(self), |project| project.parent())
    }

    /// Ancestor chain from the root down to this project.
    pub fn project_path(self) -> Vec<ProjectRef<'a>> {
        let mut path = self.self_to_root().collect::<Vec<_>>();
        path.reverse();
        path
    }

    /// All projects below this one, depth first, excluding itself.
    pub fn descendants(self) -> Vec<ProjectRef<'a>> {
        let mut result = Vec::new();
        let mut stack = self.children().collect::<Vec<_>>();
        stack.reverse();
        while let Some(project) = stack.pop() {
            result.push(project);
            let mut children = project.children().collect::<Vec<_>>();
            children.reverse();
            stack.extend(children);
        }
        result
    }

    pub fn own_build_types(self) -> impl Iterator<Item = SettingsRef<'a>> + 'a {
        self.node()
            .build_types
            .iter()
            .map(move |settings| SettingsRef {
                project: self,
                settings,
                kind: SettingsKind::BuildType,
            })
    }

    pub fn own_templates(self) -> impl Iterator<Item = SettingsRef<'a>> + 'a {
        self.node()
            .templates
            .iter()
            .map(move |settings| SettingsRef {
                project: self,
                settings,
                kind: SettingsKind::Template,
            })
    }

    /// Build configurations followed by templates.
    pub fn own_settings(self) -> impl Iterator<Item = SettingsRef<'a>> + 'a {
        self.own_build_types().chain(self.own_templates())
    }
}

impl PartialEq for ProjectRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for ProjectRef<'_> {}

impl Hash for ProjectRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl std::fmt::Debug for ProjectRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProjectRef").field(&self.id()).finish()
    }
}

impl Display for ProjectRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A build configuration or template together with its owning project.
#[derive(Debug, Clone, Copy)]
pub struct SettingsRef<'a> {
    project: ProjectRef<'a>,
    settings: &'a BuildSettings,
    kind: SettingsKind,
}

impl<'a> SettingsRef<'a> {
    pub fn project(self) -> ProjectRef<'a> {
        self.project
    }

    pub fn settings(self) -> &'a BuildSettings {
        self.settings
    }

    pub fn kind(self) -> SettingsKind {
        self.kind
    }
}

impl Deref for SettingsRef<'_> {
    type Target = BuildSettings;

    fn deref(&self) -> &Self::Target {
        self.settings
    }
}
