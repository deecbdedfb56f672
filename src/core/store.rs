//! Project persistence: the on-disk JSON format and the load/save seam.
//!
//! One file per project at `<root>/<name>/save.json`. The wire format
//! (see `SaveFile`) uses 1-based scene references in buttons while the
//! in-memory model is 0-based; this module is the only place that
//! conversion happens. The `info.editor.current_scene` field is 0-based
//! on disk as well as in memory (it stores the editor's scene-picker
//! position, not a scene reference).

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::project::{Choice, ChoiceTarget, Project, Scene};

/// File name of the persisted document inside a project directory.
pub const SAVE_FILE: &str = "save.json";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but is not a valid project. Unlike the settings
    /// file, a corrupt project is never reset or overwritten: the
    /// content is authored and irreplaceable.
    #[error("project file for '{name}' is corrupt: {reason}")]
    CorruptProject { name: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Maps projects to and from their directory under a fixed root.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn save_path(&self, name: &str) -> PathBuf {
        self.project_dir(name).join(SAVE_FILE)
    }

    /// True if a persisted document exists for `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.save_path(name).is_file()
    }

    /// Load the project named `name`.
    ///
    /// A missing file is first-run: the default template is synthesized,
    /// persisted, and returned. A present but unreadable or invalid file
    /// is `CorruptProject` and is left untouched on disk.
    pub fn load(&self, name: &str) -> Result<Project, StoreError> {
        let path = self.save_path(name);
        if !path.is_file() {
            info!("no save file for '{name}', bootstrapping default template");
            let project = Project::default_template(name, Vec::new(), "out/");
            self.save(&project)?;
            return Ok(project);
        }

        let contents = fs::read_to_string(&path)?;
        let raw: SaveFile =
            serde_json::from_str(&contents).map_err(|e| StoreError::CorruptProject {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let project = decode(name, raw)?;
        debug!("loaded '{}' ({} scenes)", project.name, project.scenes.len());
        Ok(project)
    }

    /// Persist the full project, all-or-nothing: the document is
    /// written to a temporary file and atomically renamed over the old
    /// save, so a failed write never leaves a truncated project.
    pub fn save(&self, project: &Project) -> Result<(), StoreError> {
        let dir = self.project_dir(&project.name);
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(&encode(project))
            .map_err(|e| StoreError::Io(io::Error::other(e)))?;

        let path = dir.join(SAVE_FILE);
        let tmp = dir.join(format!("{SAVE_FILE}.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!("saved '{}' to {}", project.name, path.display());
        Ok(())
    }
}

// Wire types: the exact on-disk JSON shape. Kept separate from the
// schema types so the 1-based persisted references never leak into
// editing logic (the same split the save format had historically).

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    info: SaveInfo,
    scenes: Vec<SaveScene>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveInfo {
    name: String,
    authors: Vec<String>,
    out: String,
    editor: SaveEditor,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveEditor {
    current_scene: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveScene {
    title: String,
    buttons: Vec<SaveChoice>,
}

/// A button on disk: `[label, target]` with a 1-based target. `0` is
/// never a live reference in 1-based form, so it encodes a dangling
/// target.
#[derive(Debug, Serialize, Deserialize)]
struct SaveChoice(String, usize);

fn encode(project: &Project) -> SaveFile {
    SaveFile {
        info: SaveInfo {
            name: project.name.clone(),
            authors: project.authors.clone(),
            out: project.out_dir.clone(),
            editor: SaveEditor {
                current_scene: project.current_scene.unwrap_or(0),
            },
        },
        scenes: project
            .scenes
            .iter()
            .map(|scene| SaveScene {
                title: scene.title.clone(),
                buttons: scene
                    .buttons
                    .iter()
                    .map(|b| {
                        let wire_target = match b.target {
                            ChoiceTarget::Scene(t) => t + 1,
                            ChoiceTarget::Dangling => 0,
                        };
                        SaveChoice(b.label.clone(), wire_target)
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn decode(name: &str, raw: SaveFile) -> Result<Project, StoreError> {
    let corrupt = |reason: String| StoreError::CorruptProject {
        name: name.to_string(),
        reason,
    };

    let scene_count = raw.scenes.len();
    let mut scenes = Vec::with_capacity(scene_count);
    for (i, raw_scene) in raw.scenes.into_iter().enumerate() {
        let mut buttons = Vec::with_capacity(raw_scene.buttons.len());
        for SaveChoice(label, wire_target) in raw_scene.buttons {
            let target = match wire_target {
                0 => ChoiceTarget::Dangling,
                t if t <= scene_count => ChoiceTarget::Scene(t - 1),
                t => {
                    return Err(corrupt(format!(
                        "scene {i} button targets scene {t} but only {scene_count} scenes exist"
                    )))
                }
            };
            buttons.push(Choice { label, target });
        }
        scenes.push(Scene {
            title: raw_scene.title,
            buttons,
        });
    }

    let cursor = raw.info.editor.current_scene;
    let current_scene = if scene_count == 0 {
        if cursor != 0 {
            return Err(corrupt(format!(
                "cursor at scene {cursor} but the project has no scenes"
            )));
        }
        None
    } else if cursor < scene_count {
        Some(cursor)
    } else {
        return Err(corrupt(format!(
            "cursor at scene {cursor} but only {scene_count} scenes exist"
        )));
    };

    Ok(Project {
        name: raw.info.name,
        authors: raw.info.authors,
        out_dir: raw.info.out,
        current_scene,
        scenes,
    })
}
