//! Render and share collaborators.
//!
//! Rendering turns a finished document into a file; sharing hands that file
//! to whatever the platform offers (a viewer, a share sheet, nothing).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// Turns a document into a file on disk.
pub trait DocumentRenderer {
    /// Store `document` under a name derived from `file_stem` and return
    /// the file's path.
    fn render(&self, document: &str, file_stem: &str) -> Result<PathBuf>;
}

/// Hands a rendered file to the user.
pub trait DocumentSharer {
    fn share(&self, path: &Path) -> Result<()>;
}

/// Writes documents as `.html` files into a directory.
#[derive(Debug, Clone)]
pub struct HtmlFileRenderer {
    output_dir: PathBuf,
}

impl HtmlFileRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl DocumentRenderer for HtmlFileRenderer {
    fn render(&self, document: &str, file_stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ExportError::Io {
            operation: "create directory",
            path: self.output_dir.clone(),
            source: e,
        })?;
        let path = self.output_dir.join(format!("{file_stem}.html"));
        let temp_path = path.with_extension("html.tmp");
        fs::write(&temp_path, document).map_err(|e| ExportError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(ExportError::Io {
                operation: "rename",
                path,
                source: e,
            });
        }
        Ok(path)
    }
}

/// Opens the file with the system's default application.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl DocumentSharer for SystemOpener {
    fn share(&self, path: &Path) -> Result<()> {
        open::that(path).map_err(|e| ExportError::Share {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Leaves the rendered file where it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShare;

impl DocumentSharer for NoShare {
    fn share(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_renderer_writes_html_file() {
        let dir = tempdir().unwrap();
        let renderer = HtmlFileRenderer::new(dir.path().join("exports"));

        let path = renderer.render("<html></html>", "inventory-marlin").unwrap();

        assert_eq!(path, dir.path().join("exports").join("inventory-marlin.html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        assert!(!path.with_extension("html.tmp").exists());
    }

    #[test]
    fn test_renderer_reports_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let renderer = HtmlFileRenderer::new(&blocker);

        let result = renderer.render("doc", "stem");
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
