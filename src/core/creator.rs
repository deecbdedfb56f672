//! One-shot project bootstrap.

use log::info;
use std::fs;
use std::io;
use thiserror::Error;

use crate::core::store::{ProjectStore, StoreError};
use crate::schema::project::Project;

#[derive(Debug, Error)]
pub enum CreateError {
    /// A project directory with this name already exists. Creation
    /// never overwrites an existing project; the user picks another
    /// name.
    #[error("a project named '{0}' already exists")]
    NameConflict(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Creates new projects under a store's root: allocates the project
/// directory and its output subdirectory, then persists the default
/// three-scene template.
#[derive(Debug)]
pub struct ProjectCreator {
    store: ProjectStore,
}

impl ProjectCreator {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    pub fn create(
        &self,
        name: &str,
        authors: Vec<String>,
        out_dir: &str,
    ) -> Result<Project, CreateError> {
        let dir = self.store.project_dir(name);
        if dir.exists() {
            return Err(CreateError::NameConflict(name.to_string()));
        }
        fs::create_dir_all(&dir)?;
        fs::create_dir_all(dir.join(out_dir))?;

        let project = Project::default_template(name, authors, out_dir);
        self.store.save(&project)?;
        info!("created project '{name}' at {}", dir.display());
        Ok(project)
    }
}
