//! The interactive editing session: one open document, persisted after
//! every successful edit.
//!
//! The session is the commit point between the pure document and the
//! store. Every structural mutation and every cursor move is written to
//! disk before the call returns, so there is no separate save gesture
//! needed for durability (one is still exposed for the UI's save
//! button). `close` is advisory cleanup; operations after it fail.

use log::debug;
use thiserror::Error;

use crate::core::document::{DocumentError, ProjectDocument};
use crate::core::store::{ProjectStore, StoreError};
use crate::schema::project::Project;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Operation attempted after `close`. A sequencing bug in the
    /// caller, not a user-recoverable condition.
    #[error("session is closed")]
    SessionClosed,
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// An exclusive editing session over one project.
///
/// Constructed only via `open`, so an unopened session is not
/// representable; the only runtime state transition is open → closed.
#[derive(Debug)]
pub struct EditSession {
    store: ProjectStore,
    document: Option<ProjectDocument>,
}

impl EditSession {
    /// Load the named project and start a session on it. First-run
    /// bootstrap and corruption handling follow `ProjectStore::load`.
    pub fn open(store: ProjectStore, name: &str) -> Result<Self, SessionError> {
        let project = store.load(name)?;
        debug!("opened session on '{}'", project.name);
        Ok(Self {
            store,
            document: Some(ProjectDocument::new(project)),
        })
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Read-only view of the open document.
    pub fn document(&self) -> Result<&ProjectDocument, SessionError> {
        self.document.as_ref().ok_or(SessionError::SessionClosed)
    }

    /// Read-only view of the underlying project.
    pub fn project(&self) -> Result<&Project, SessionError> {
        Ok(self.document()?.project())
    }

    /// Move the cursor and persist it, so the selection survives a
    /// restart.
    pub fn select_scene(&mut self, index: usize) -> Result<(), SessionError> {
        self.mutate(|doc| doc.set_current_scene(index))
    }

    pub fn add_scene(&mut self, title: &str) -> Result<usize, SessionError> {
        self.mutate(|doc| Ok(doc.add_scene(title)))
    }

    pub fn remove_scene(&mut self, index: usize) -> Result<(), SessionError> {
        self.mutate(|doc| doc.remove_scene(index))
    }

    pub fn add_button(
        &mut self,
        scene: usize,
        label: &str,
        target: usize,
    ) -> Result<usize, SessionError> {
        self.mutate(|doc| doc.add_button(scene, label, target))
    }

    pub fn edit_button(
        &mut self,
        scene: usize,
        button: usize,
        label: Option<&str>,
        target: Option<usize>,
    ) -> Result<(), SessionError> {
        self.mutate(|doc| doc.edit_button(scene, button, label, target))
    }

    pub fn remove_button(&mut self, scene: usize, button: usize) -> Result<(), SessionError> {
        self.mutate(|doc| doc.remove_button(scene, button))
    }

    /// Explicit save. Durability already happens on every edit, so this
    /// only matters after a failed autosave.
    pub fn save(&self) -> Result<(), SessionError> {
        let doc = self.document()?;
        self.store.save(doc.project())?;
        Ok(())
    }

    /// End the session. Everything is already on disk; this only
    /// releases the document. Closing twice is a sequencing error.
    pub fn close(&mut self) -> Result<(), SessionError> {
        match self.document.take() {
            Some(doc) => {
                debug!("closed session on '{}'", doc.project().name);
                Ok(())
            }
            None => Err(SessionError::SessionClosed),
        }
    }

    /// Apply one document operation, then persist. A failed operation
    /// persists nothing and propagates unchanged; a failed save leaves
    /// the in-memory document ahead of disk, and the caller may retry
    /// with `save`.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut ProjectDocument) -> Result<T, DocumentError>,
    ) -> Result<T, SessionError> {
        let doc = self.document.as_mut().ok_or(SessionError::SessionClosed)?;
        let out = op(doc)?;
        self.store.save(doc.project())?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::project::ChoiceTarget;
    use tempfile::TempDir;

    fn open_demo(dir: &TempDir) -> EditSession {
        EditSession::open(ProjectStore::new(dir.path()), "Demo").unwrap()
    }

    #[test]
    fn open_bootstraps_default_template() {
        let dir = TempDir::new().unwrap();
        let session = open_demo(&dir);
        assert!(session.is_open());
        assert_eq!(session.document().unwrap().scene_count(), 3);
    }

    #[test]
    fn mutation_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let mut session = open_demo(&dir);
        session.add_scene("Scene 4").unwrap();

        // A fresh load, without closing the session, sees the edit
        let reloaded = store.load("Demo").unwrap();
        assert_eq!(reloaded.scenes.len(), 4);
    }

    #[test]
    fn selection_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let mut session = open_demo(&dir);
        session.select_scene(2).unwrap();
        assert_eq!(store.load("Demo").unwrap().current_scene, Some(2));
    }

    #[test]
    fn failed_mutation_does_not_persist() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let mut session = open_demo(&dir);
        let before = store.load("Demo").unwrap();

        let err = session.select_scene(5).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Document(DocumentError::SceneOutOfRange { index: 5, len: 3 })
        ));
        assert_eq!(session.project().unwrap().current_scene, Some(0));
        assert_eq!(store.load("Demo").unwrap(), before);
    }

    #[test]
    fn remove_scene_through_session() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let mut session = open_demo(&dir);
        session.remove_scene(1).unwrap();

        let reloaded = store.load("Demo").unwrap();
        assert_eq!(reloaded.scenes.len(), 2);
        assert_eq!(reloaded.scenes[0].buttons[0].target, ChoiceTarget::Dangling);
        assert_eq!(reloaded.scenes[0].buttons[1].target, ChoiceTarget::Scene(1));
    }

    #[test]
    fn operations_after_close_fail() {
        let dir = TempDir::new().unwrap();
        let mut session = open_demo(&dir);
        session.close().unwrap();
        assert!(!session.is_open());

        assert!(matches!(
            session.add_scene("Late"),
            Err(SessionError::SessionClosed)
        ));
        assert!(matches!(
            session.select_scene(0),
            Err(SessionError::SessionClosed)
        ));
        assert!(matches!(session.save(), Err(SessionError::SessionClosed)));
        assert!(matches!(session.close(), Err(SessionError::SessionClosed)));
    }

    #[test]
    fn edit_button_round_trip_through_session() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let mut session = open_demo(&dir);
        session.edit_button(0, 1, Some("Jump ahead"), Some(0)).unwrap();

        let reloaded = store.load("Demo").unwrap();
        assert_eq!(reloaded.scenes[0].buttons[1].label, "Jump ahead");
        assert_eq!(reloaded.scenes[0].buttons[1].target, ChoiceTarget::Scene(0));
    }

    #[test]
    fn open_propagates_corruption() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        std::fs::create_dir_all(store.project_dir("Hurt")).unwrap();
        std::fs::write(store.save_path("Hurt"), "][").unwrap();

        let err = EditSession::open(store, "Hurt").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Store(StoreError::CorruptProject { .. })
        ));
    }
}
