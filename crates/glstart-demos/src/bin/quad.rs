use std::process::ExitCode;

use glstart_demos::scenes::QuadScene;

fn main() -> ExitCode {
    glstart_demos::run(glstart_demos::window_config("MyOpenGLWindow"), QuadScene::new())
}
