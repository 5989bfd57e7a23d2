//! Opening files and folders with the desktop's default handlers.
//!
//! The index can point at files that were moved or deleted after filing.
//! Opening such a path is not an error: it returns
//! [`OpenOutcome::Missing`] and launches nothing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// What an open action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The handler was started for this path.
    Launched(PathBuf),
    /// The path no longer exists; nothing was started.
    Missing(PathBuf),
}

/// Launches an external handler for a path.
pub trait Opener {
    fn launch(&self, target: &Path) -> Result<()>;
}

/// Opener backed by the desktop's default handler (`open`, `explorer` or
/// `xdg-open`, picked by the `opener` crate at runtime).
///
/// Fire-and-forget: the handler's exit status is never collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    pub fn new() -> Self {
        Self
    }
}

impl Opener for SystemOpener {
    fn launch(&self, target: &Path) -> Result<()> {
        ::opener::open(target).with_context(|| format!("Failed to open {}", target.display()))
    }
}

/// Open `path` with its default application.
pub fn open_file(opener: &dyn Opener, path: &Path) -> Result<OpenOutcome> {
    if !path.exists() {
        tracing::debug!("not opening missing file {}", path.display());
        return Ok(OpenOutcome::Missing(path.to_path_buf()));
    }
    opener.launch(path)?;
    Ok(OpenOutcome::Launched(path.to_path_buf()))
}

/// Open the folder containing `path`, or `path` itself if it is a
/// directory.
pub fn open_folder(opener: &dyn Opener, path: &Path) -> Result<OpenOutcome> {
    let folder = containing_folder(path);
    if !folder.exists() {
        tracing::debug!("not opening missing folder {}", folder.display());
        return Ok(OpenOutcome::Missing(folder));
    }
    opener.launch(&folder)?;
    Ok(OpenOutcome::Launched(folder))
}

fn containing_folder(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Opener that records what it was asked to launch.
    #[derive(Default)]
    pub(crate) struct RecordingOpener {
        pub(crate) launched: RefCell<Vec<PathBuf>>,
    }

    impl Opener for RecordingOpener {
        fn launch(&self, target: &Path) -> Result<()> {
            self.launched.borrow_mut().push(target.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_open_file_launches_existing() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("invoice.pdf");
        fs::write(&file, b"%PDF").unwrap();

        let opener = RecordingOpener::default();
        let outcome = open_file(&opener, &file).unwrap();

        assert_eq!(outcome, OpenOutcome::Launched(file.clone()));
        assert_eq!(*opener.launched.borrow(), vec![file]);
    }

    #[test]
    fn test_open_file_missing_is_noop() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("gone.pdf");

        let opener = RecordingOpener::default();
        let outcome = open_file(&opener, &file).unwrap();

        assert_eq!(outcome, OpenOutcome::Missing(file));
        assert!(opener.launched.borrow().is_empty());
    }

    #[test]
    fn test_system_opener_skips_missing_paths() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("moved").join("letter.pdf");

        let opener = SystemOpener::new();
        assert_eq!(
            open_file(&opener, &gone).unwrap(),
            OpenOutcome::Missing(gone.clone())
        );
        assert_eq!(
            open_folder(&opener, &gone).unwrap(),
            OpenOutcome::Missing(gone)
        );
    }

    #[test]
    fn test_open_folder_uses_parent_of_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("receipt.txt");
        fs::write(&file, "paid").unwrap();

        let opener = RecordingOpener::default();
        let outcome = open_folder(&opener, &file).unwrap();

        assert_eq!(outcome, OpenOutcome::Launched(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_open_folder_on_directory_opens_it() {
        let tmp = TempDir::new().unwrap();
        let opener = RecordingOpener::default();
        let outcome = open_folder(&opener, tmp.path()).unwrap();
        assert_eq!(outcome, OpenOutcome::Launched(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_open_folder_missing_is_noop() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("moved").join("file.txt");

        let opener = RecordingOpener::default();
        let outcome = open_folder(&opener, &gone).unwrap();

        assert_eq!(outcome, OpenOutcome::Missing(gone));
        assert!(opener.launched.borrow().is_empty());
    }
}
