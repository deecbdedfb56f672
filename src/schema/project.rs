use serde::{Deserialize, Serialize};

/// Where a choice button leads.
///
/// Scene references are 0-based positions into `Project::scenes`. The
/// persisted file uses 1-based references; that conversion happens in
/// the store, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceTarget {
    /// A live reference to a scene by position.
    Scene(usize),
    /// The referenced scene was removed. The label is preserved so the
    /// author can re-point the button instead of losing it.
    Dangling,
}

impl ChoiceTarget {
    /// The referenced scene index, if the target is live.
    pub fn scene(&self) -> Option<usize> {
        match self {
            Self::Scene(index) => Some(*index),
            Self::Dangling => None,
        }
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::Dangling)
    }
}

/// A labeled directed edge from one scene to another. Self-loops are
/// permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub target: ChoiceTarget,
}

impl Choice {
    pub fn new(label: impl Into<String>, target: usize) -> Self {
        Self {
            label: label.into(),
            target: ChoiceTarget::Scene(target),
        }
    }
}

/// A node in the scene graph: a title plus an ordered list of choice
/// buttons. Button order is authorial and scene-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub buttons: Vec<Choice>,
}

impl Scene {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buttons: Vec::new(),
        }
    }
}

/// A branching-narrative document.
///
/// Scene order is the sole addressing scheme: a scene's identity is its
/// position in `scenes`, and every `Choice` refers to scenes by that
/// position. `current_scene` is the editor cursor, persisted across
/// sessions; it is `None` exactly when `scenes` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Immutable once created; doubles as the storage key.
    pub name: String,
    pub authors: Vec<String>,
    pub out_dir: String,
    pub current_scene: Option<usize>,
    pub scenes: Vec<Scene>,
}

impl Project {
    /// The default three-scene starter template: each scene links to
    /// the other two.
    pub fn default_template(
        name: impl Into<String>,
        authors: Vec<String>,
        out_dir: impl Into<String>,
    ) -> Self {
        let mut scenes = Vec::with_capacity(3);
        for i in 0..3usize {
            let mut scene = Scene::new(format!("Scene {}", i + 1));
            for j in 0..3usize {
                if j != i {
                    scene
                        .buttons
                        .push(Choice::new(format!("Go to scene {}", j + 1), j));
                }
            }
            scenes.push(scene);
        }
        Self {
            name: name.into(),
            authors,
            out_dir: out_dir.into(),
            current_scene: Some(0),
            scenes,
        }
    }
}
