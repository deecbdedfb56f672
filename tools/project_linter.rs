/// Project Linter — validates a project's scene graph.
///
/// Usage: project_linter <projects_root> <name>
///
/// Reports dangling choice buttons, scenes unreachable from the first
/// scene, and scenes with no way out.

use std::collections::HashSet;
use std::process;
use storyloom::core::store::ProjectStore;
use storyloom::schema::project::Project;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: project_linter <projects_root> <name>");
        process::exit(0);
    }

    let store = ProjectStore::new(&args[1]);
    let name = &args[2];

    if !store.exists(name) {
        eprintln!("ERROR: No project named '{}' under {}", name, args[1]);
        process::exit(1);
    }

    let project = match store.load(name) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("ERROR: Failed to load project: {}", e);
            process::exit(1);
        }
    };

    let button_count: usize = project.scenes.iter().map(|s| s.buttons.len()).sum();
    println!(
        "Loaded '{}': {} scenes, {} buttons",
        project.name,
        project.scenes.len(),
        button_count
    );

    let warnings = lint_project(&project);

    println!("\n=== Project Lint Report ===\n");

    if warnings.is_empty() {
        println!("All checks passed!");
    }
    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    println!("\nSummary: {} warnings", warnings.len());
    process::exit(if warnings.is_empty() { 0 } else { 1 });
}

fn lint_project(project: &Project) -> Vec<String> {
    let mut warnings = Vec::new();

    for (i, scene) in project.scenes.iter().enumerate() {
        for (j, button) in scene.buttons.iter().enumerate() {
            if button.target.is_dangling() {
                warnings.push(format!(
                    "scene {} ('{}') button {} ('{}') points at a removed scene",
                    i, scene.title, j, button.label
                ));
            }
        }
        if scene.buttons.is_empty() {
            warnings.push(format!("scene {} ('{}') has no way out", i, scene.title));
        }
    }

    for i in unreachable_scenes(project) {
        warnings.push(format!(
            "scene {} ('{}') is unreachable from the first scene",
            i, project.scenes[i].title
        ));
    }

    warnings
}

/// Scenes not reachable by following live choices from scene 0.
fn unreachable_scenes(project: &Project) -> Vec<usize> {
    if project.scenes.is_empty() {
        return Vec::new();
    }

    let mut visited: HashSet<usize> = HashSet::new();
    let mut stack = vec![0usize];
    while let Some(i) = stack.pop() {
        if !visited.insert(i) {
            continue;
        }
        for button in &project.scenes[i].buttons {
            if let Some(t) = button.target.scene() {
                if !visited.contains(&t) {
                    stack.push(t);
                }
            }
        }
    }

    (0..project.scenes.len())
        .filter(|i| !visited.contains(i))
        .collect()
}
