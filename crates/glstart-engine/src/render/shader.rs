use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glow::HasContext;

/// Size of the fixed diagnostic buffer the driver log is read into,
/// including the terminating NUL.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// Upper-case stage name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }
}

/// Shader build failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// The driver refused to create a shader or program object.
    Create(String),
    /// Compile status was false for one stage.
    Compile { stage: ShaderStage, log: String },
    /// Link status was false.
    Link { log: String },
    /// A shader file could not be read.
    Read { path: PathBuf, message: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Create(msg) => write!(f, "ERROR::SHADER::CREATE_FAILED\n{msg}"),
            ShaderError::Compile { stage, log } => {
                write!(f, "ERROR::SHADER::{}::COMPILATION_FAILED\n{log}", stage.label())
            }
            ShaderError::Link { log } => write!(f, "ERROR::SHADER::PROGRAM::LINKING_FAILED\n{log}"),
            ShaderError::Read { path, message } => write!(
                f,
                "ERROR::SHADER::FILE_NOT_SUCCESSFULLY_READ {}: {message}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Cuts a driver info log down to what fits the fixed diagnostic buffer.
///
/// Keeps at most `INFO_LOG_CAPACITY - 1` bytes, never splitting a UTF-8
/// sequence, and drops trailing whitespace and NULs.
pub fn truncate_info_log(log: &str) -> &str {
    let mut end = log.len().min(INFO_LOG_CAPACITY - 1);
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log[..end].trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
}

/// Compiles one stage. On failure the shader object is deleted and the
/// truncated driver log is returned.
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> std::result::Result<glow::Shader, ShaderError> {
    unsafe {
        let shader = gl.create_shader(stage.gl_enum()).map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = truncate_info_log(&gl.get_shader_info_log(shader)).to_string();
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(shader)
    }
}

/// How program construction reacts to a failed stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum StageFailure {
    /// No GL object could be created; construction returns the error.
    Abort,
    /// The driver rejected the source; the log is printed and linking still runs.
    LogAndContinue,
}

fn stage_failure(err: &ShaderError) -> StageFailure {
    match err {
        ShaderError::Create(_) => StageFailure::Abort,
        ShaderError::Compile { .. } | ShaderError::Link { .. } | ShaderError::Read { .. } => {
            StageFailure::LogAndContinue
        }
    }
}

/// A program counts as linked only if every stage compiled and the link
/// status is true.
fn program_linked(compiled: bool, link_status: bool) -> bool {
    compiled && link_status
}

/// A linked vertex + fragment program.
///
/// Mirrors the behavior the programs rely on: compile or link failures are
/// reported through the log and construction carries on, leaving a program
/// that draws nothing. Use [`ShaderProgram::require_linked`] to turn that into
/// an error instead.
#[derive(Debug)]
pub struct ShaderProgram {
    program: glow::Program,
    linked: bool,
}

impl ShaderProgram {
    /// Compiles both stages from source and links them.
    ///
    /// Only GL object creation failures are returned as errors.
    pub fn from_sources(gl: &glow::Context, vertex: &str, fragment: &str) -> Result<Self> {
        let program = unsafe { gl.create_program() }
            .map_err(ShaderError::Create)
            .context("failed to create shader program")?;

        let mut shaders = Vec::with_capacity(2);
        let mut compiled = true;
        for (stage, source) in [(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)] {
            match compile_shader(gl, stage, source) {
                Ok(shader) => {
                    unsafe { gl.attach_shader(program, shader) };
                    shaders.push(shader);
                }
                Err(err) => match stage_failure(&err) {
                    StageFailure::Abort => {
                        unsafe {
                            for shader in shaders {
                                gl.delete_shader(shader);
                            }
                            gl.delete_program(program);
                        }
                        return Err(err)
                            .with_context(|| format!("failed to create {} shader", stage.label()));
                    }
                    StageFailure::LogAndContinue => {
                        log::error!("{err}");
                        compiled = false;
                    }
                },
            }
        }

        let linked = unsafe {
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            if !linked {
                let log = truncate_info_log(&gl.get_program_info_log(program)).to_string();
                log::error!("{}", ShaderError::Link { log });
            }

            // Shader objects are not needed once linked into the program.
            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            linked
        };

        let linked = program_linked(compiled, linked);
        if linked {
            log::debug!("shader program {program:?} linked");
        }

        Ok(Self { program, linked })
    }

    /// Reads both stages from disk, then behaves like [`ShaderProgram::from_sources`].
    pub fn from_files(
        gl: &glow::Context,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex = read_source(vertex_path.as_ref())?;
        let fragment = read_source(fragment_path.as_ref())?;
        Self::from_sources(gl, &vertex, &fragment)
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Returns `self` only if linking succeeded.
    pub fn require_linked(&self) -> Result<&Self> {
        anyhow::ensure!(self.linked, "shader program {:?} failed to link", self.program);
        Ok(self)
    }

    pub fn raw(&self) -> glow::Program {
        self.program
    }

    /// Makes this the current program (`glUseProgram`).
    pub fn use_program(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Uniform setters apply to the current program: call
    /// [`ShaderProgram::use_program`] first.
    pub fn set_bool(&self, gl: &glow::Context, name: &str, value: bool) {
        self.set_int(gl, name, i32::from(value));
    }

    pub fn set_int(&self, gl: &glow::Context, name: &str, value: i32) {
        if let Some(location) = self.uniform_location(gl, name) {
            unsafe { gl.uniform_1_i32(Some(&location), value) };
        }
    }

    pub fn set_float(&self, gl: &glow::Context, name: &str, value: f32) {
        if let Some(location) = self.uniform_location(gl, name) {
            unsafe { gl.uniform_1_f32(Some(&location), value) };
        }
    }

    fn uniform_location(&self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        let location = unsafe { gl.get_uniform_location(self.program, name) };
        if location.is_none() {
            // Unused uniforms are optimized out by the driver as well.
            log::debug!("uniform `{name}` not found in program {:?}", self.program);
        }
        location
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) };
    }
}

fn read_source(path: &Path) -> Result<String> {
    log::debug!("loading shader {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| ShaderError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_log_is_kept() {
        assert_eq!(truncate_info_log("0:1(1): error: syntax error\n"), "0:1(1): error: syntax error");
    }

    #[test]
    fn long_log_fits_the_buffer() {
        let log = "x".repeat(2000);
        assert_eq!(truncate_info_log(&log).len(), INFO_LOG_CAPACITY - 1);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 510 ASCII bytes followed by a 2-byte char straddling the limit.
        let log = format!("{}é", "a".repeat(510));
        let cut = truncate_info_log(&log);
        assert_eq!(cut.len(), 510);
        assert!(cut.is_char_boundary(cut.len()));
    }

    #[test]
    fn trailing_nul_is_dropped() {
        assert_eq!(truncate_info_log("link failed\0\0"), "link failed");
    }

    #[test]
    fn compile_error_names_the_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\nbad");
    }

    #[test]
    fn link_error_format() {
        let err = ShaderError::Link { log: "missing main".to_string() };
        assert_eq!(err.to_string(), "ERROR::SHADER::PROGRAM::LINKING_FAILED\nmissing main");
    }

    #[test]
    fn stages_map_to_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn object_creation_failure_aborts() {
        let err = ShaderError::Create("out of memory".to_string());
        assert_eq!(stage_failure(&err), StageFailure::Abort);
    }

    #[test]
    fn compile_failure_is_logged_and_build_continues() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:3(1): error: syntax error".to_string(),
        };
        assert_eq!(stage_failure(&err), StageFailure::LogAndContinue);
        assert_eq!(
            stage_failure(&ShaderError::Link { log: String::new() }),
            StageFailure::LogAndContinue
        );
    }

    #[test]
    fn program_is_linked_only_when_everything_succeeded() {
        assert!(program_linked(true, true));
        assert!(!program_linked(false, true));
        assert!(!program_linked(true, false));
        assert!(!program_linked(false, false));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("glstart-no-such-shader.vert");
        let err = read_source(&path).unwrap_err();
        let shader_err = err.downcast_ref::<ShaderError>().unwrap();
        assert!(matches!(shader_err, ShaderError::Read { .. }));
    }
}
