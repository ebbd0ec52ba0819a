//! Scene reference listing. Needs no backend.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use wizly_core::Scene;

use crate::cli::GlobalOpts;
use crate::output;

#[derive(Serialize, Tabled)]
struct SceneRow {
    #[tabled(rename = "Scene")]
    name: String,
    #[tabled(rename = "Code")]
    code: i32,
}

fn rows() -> Vec<SceneRow> {
    Scene::iter()
        .map(|scene| SceneRow {
            name: scene.to_string(),
            code: scene.id().0,
        })
        .collect()
}

pub fn handle(global: &GlobalOpts) {
    let scenes = rows();
    let out = output::render_list(
        &global.output,
        &scenes,
        |s| SceneRow {
            name: s.name.clone(),
            code: s.code,
        },
        |s| s.name.clone(),
    );
    output::print_output(&out, global.quiet);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_scene_with_its_code() {
        let rows = rows();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().any(|r| r.name == "warm-white" && r.code == 11));
    }
}
