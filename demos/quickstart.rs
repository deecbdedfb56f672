/// Quickstart — create a project, edit its scene graph, reload it.
///
/// Run with: cargo run --example quickstart
///
/// Projects land under `./editor/` the way the desktop shell lays them
/// out; rerunning picks the existing project back up.

use storyloom::core::creator::{CreateError, ProjectCreator};
use storyloom::core::session::EditSession;
use storyloom::core::store::ProjectStore;

fn main() {
    env_logger::init();

    let store = ProjectStore::new("editor");

    // --- Create the project (or reuse it on a second run) ---
    let creator = ProjectCreator::new(store.clone());
    match creator.create(
        "Quickstart",
        vec!["JX".to_string()],
        "out/",
    ) {
        Ok(project) => println!(
            "Created '{}' with {} starter scenes",
            project.name,
            project.scenes.len()
        ),
        Err(CreateError::NameConflict(name)) => {
            println!("Project '{name}' already exists, opening it")
        }
        Err(e) => {
            eprintln!("Failed to create project: {e}");
            std::process::exit(1);
        }
    }

    // --- Edit it through a session; every step autosaves ---
    let mut session = EditSession::open(store.clone(), "Quickstart")
        .expect("Failed to open session");

    let ending = session
        .add_scene("The End")
        .expect("Failed to add scene");
    session
        .add_button(0, "Skip to the end", ending)
        .expect("Failed to add button");
    session
        .add_button(ending, "Play again", 0)
        .expect("Failed to add button");
    session.select_scene(ending).expect("Failed to select scene");
    session.close().expect("Failed to close session");

    // --- Reload and show what is on disk ---
    let project = store.load("Quickstart").expect("Failed to reload");
    println!("\n'{}' by {}", project.name, project.authors.join(", "));
    for (i, scene) in project.scenes.iter().enumerate() {
        let marker = if project.current_scene == Some(i) {
            " (current)"
        } else {
            ""
        };
        println!("  [{}] {}{}", i, scene.title, marker);
        for button in &scene.buttons {
            match button.target.scene() {
                Some(t) => println!("        '{}' -> scene {}", button.label, t),
                None => println!("        '{}' -> (dangling)", button.label),
            }
        }
    }
}
