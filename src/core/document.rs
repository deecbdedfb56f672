//! The authoritative in-memory scene graph and its structural edits.
//!
//! `ProjectDocument` owns a `Project` and guarantees that after every
//! operation no choice points outside the scene list (dangling markers
//! excepted) and the cursor is valid whenever scenes exist. It performs
//! no I/O; persistence is the session's job.

use log::debug;
use thiserror::Error;

use crate::schema::project::{Choice, ChoiceTarget, Project, Scene};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("scene index {index} out of range (document has {len} scenes)")]
    SceneOutOfRange { index: usize, len: usize },
    #[error("button index {index} out of range (scene has {len} buttons)")]
    ButtonOutOfRange { index: usize, len: usize },
}

/// A mutable scene graph with referential integrity enforced on every
/// edit. All index arguments are validated before anything is touched,
/// so a failed operation leaves the document unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDocument {
    project: Project,
}

impl ProjectDocument {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Read-only view of the underlying project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consume the document, yielding the project.
    pub fn into_project(self) -> Project {
        self.project
    }

    pub fn scene_count(&self) -> usize {
        self.project.scenes.len()
    }

    pub fn scene(&self, index: usize) -> Result<&Scene, DocumentError> {
        self.check_scene(index)?;
        Ok(&self.project.scenes[index])
    }

    /// The editor cursor; `None` iff the document has no scenes.
    pub fn current_scene(&self) -> Option<usize> {
        self.project.current_scene
    }

    /// Append a new empty scene and return its index. If the document
    /// was empty, the new scene becomes current.
    pub fn add_scene(&mut self, title: impl Into<String>) -> usize {
        let index = self.project.scenes.len();
        self.project.scenes.push(Scene::new(title));
        if self.project.current_scene.is_none() {
            self.project.current_scene = Some(index);
        }
        debug!("added scene {index}");
        index
    }

    /// Remove a scene and re-link every remaining choice in one pass:
    /// references to the removed scene become dangling, references
    /// above it shift down by one, references below it are untouched.
    /// The cursor is clamped; removing the last scene clears it.
    pub fn remove_scene(&mut self, index: usize) -> Result<(), DocumentError> {
        self.check_scene(index)?;
        self.project.scenes.remove(index);

        for scene in &mut self.project.scenes {
            for button in &mut scene.buttons {
                button.target = match button.target {
                    ChoiceTarget::Scene(t) if t == index => ChoiceTarget::Dangling,
                    ChoiceTarget::Scene(t) if t > index => ChoiceTarget::Scene(t - 1),
                    other => other,
                };
            }
        }

        let len = self.project.scenes.len();
        self.project.current_scene = if len == 0 {
            None
        } else {
            self.project.current_scene.map(|cur| {
                if cur > index {
                    cur - 1
                } else if cur == index {
                    index.min(len - 1)
                } else {
                    cur
                }
            })
        };
        debug!("removed scene {index}, {len} scenes remain");
        Ok(())
    }

    /// Move the cursor. Structural state is untouched.
    pub fn set_current_scene(&mut self, index: usize) -> Result<(), DocumentError> {
        self.check_scene(index)?;
        self.project.current_scene = Some(index);
        Ok(())
    }

    /// Append a choice button to a scene and return its scene-local
    /// index. The target must be an existing scene; self-loops are
    /// allowed.
    pub fn add_button(
        &mut self,
        scene: usize,
        label: impl Into<String>,
        target: usize,
    ) -> Result<usize, DocumentError> {
        self.check_scene(scene)?;
        self.check_scene(target)?;
        let buttons = &mut self.project.scenes[scene].buttons;
        let index = buttons.len();
        buttons.push(Choice::new(label, target));
        Ok(index)
    }

    /// Partial update of a button: only the provided fields change.
    /// All indices (including a new target) are validated up front.
    pub fn edit_button(
        &mut self,
        scene: usize,
        button: usize,
        label: Option<&str>,
        target: Option<usize>,
    ) -> Result<(), DocumentError> {
        self.check_scene(scene)?;
        self.check_button(scene, button)?;
        if let Some(t) = target {
            self.check_scene(t)?;
        }
        let choice = &mut self.project.scenes[scene].buttons[button];
        if let Some(label) = label {
            choice.label = label.to_string();
        }
        if let Some(t) = target {
            choice.target = ChoiceTarget::Scene(t);
        }
        Ok(())
    }

    /// Remove a button. Button indices are scene-local, so only later
    /// buttons in the same scene shift.
    pub fn remove_button(&mut self, scene: usize, button: usize) -> Result<(), DocumentError> {
        self.check_scene(scene)?;
        self.check_button(scene, button)?;
        self.project.scenes[scene].buttons.remove(button);
        Ok(())
    }

    fn check_scene(&self, index: usize) -> Result<(), DocumentError> {
        let len = self.project.scenes.len();
        if index >= len {
            return Err(DocumentError::SceneOutOfRange { index, len });
        }
        Ok(())
    }

    fn check_button(&self, scene: usize, button: usize) -> Result<(), DocumentError> {
        let len = self.project.scenes[scene].buttons.len();
        if button >= len {
            return Err(DocumentError::ButtonOutOfRange { index: button, len });
        }
        Ok(())
    }
}
