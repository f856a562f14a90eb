use std::process::ExitCode;

use glstart_demos::scenes::TriangleScene;

fn main() -> ExitCode {
    glstart_demos::run(glstart_demos::window_config("MyOpenGLWindow"), TriangleScene::new())
}
