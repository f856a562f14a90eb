//! Asset path resolution.
//!
//! Shader and texture files are looked up relative to a short, ordered list
//! of root directories; the first root containing the file wins.

use std::path::{Path, PathBuf};

/// Ordered set of directories assets are resolved against.
#[derive(Debug, Clone, Default)]
pub struct AssetRoot {
    roots: Vec<PathBuf>,
}

impl AssetRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the directory named by environment variable `var`, if set.
    pub fn with_env(self, var: &str) -> Self {
        match std::env::var_os(var) {
            Some(dir) if !dir.is_empty() => self.with_dir(PathBuf::from(dir)),
            _ => self,
        }
    }

    /// Adds the process working directory.
    pub fn with_working_dir(self) -> Self {
        match std::env::current_dir() {
            Ok(dir) => self.with_dir(dir),
            Err(e) => {
                log::warn!("working directory unavailable: {e}");
                self
            }
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.roots.push(dir.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// First existing `root/relative`.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.exists())
    }

    /// Like [`AssetRoot::resolve`], falling back to the first root (or the
    /// bare relative path) so the eventual open error names a real location.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        self.resolve(relative).unwrap_or_else(|| {
            log::debug!("asset {} not found under {:?}", relative.display(), self.roots);
            match self.roots.first() {
                Some(root) => root.join(relative),
                None => relative.to_path_buf(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("glstart-assets-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("shaders")).unwrap();
        dir
    }

    #[test]
    fn first_root_with_the_file_wins() {
        let empty = scratch_dir("empty");
        let full = scratch_dir("full");
        std::fs::write(full.join("shaders/a.vert"), "void main() {}").unwrap();

        let assets = AssetRoot::new().with_dir(&empty).with_dir(&full);
        assert_eq!(assets.resolve("shaders/a.vert"), Some(full.join("shaders/a.vert")));

        std::fs::remove_dir_all(empty).unwrap();
        std::fs::remove_dir_all(full).unwrap();
    }

    #[test]
    fn missing_file_falls_back_to_first_root() {
        let assets = AssetRoot::new().with_dir("/a").with_dir("/b");
        assert_eq!(assets.resolve("nope.png"), None);
        assert_eq!(assets.path("nope.png"), PathBuf::from("/a/nope.png"));
    }

    #[test]
    fn no_roots_keeps_relative_path() {
        assert_eq!(AssetRoot::new().path("x/y.png"), PathBuf::from("x/y.png"));
    }

    #[test]
    fn unset_env_var_adds_nothing() {
        let assets = AssetRoot::new().with_env("GLSTART_TEST_UNSET_ASSET_DIR");
        assert!(assets.roots().is_empty());
    }
}
