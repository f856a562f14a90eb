use std::process::ExitCode;

use glstart_demos::scenes::TexturedQuadScene;

fn main() -> ExitCode {
    let scene = TexturedQuadScene::single(glstart_demos::asset_root());
    glstart_demos::run(glstart_demos::window_config("LearnOpenGL"), scene)
}
