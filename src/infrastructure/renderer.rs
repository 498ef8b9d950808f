// src/infrastructure/renderer.rs
use crate::constants::BROWSER_LAUNCH_DELAY_MS;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::{Builder, TempDir};
use tracing::{debug, instrument};

/// Writes the rendered notes page to disk and hands it to the system browser.
///
/// The page lives in a temp directory owned by the renderer; writing a new
/// page releases the previous one.
#[derive(Debug, Default)]
pub struct PageRenderer {
    page_dir: Option<TempDir>,
}

impl PageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_temp_file(&mut self, content: &str) -> Result<PathBuf> {
        let page_dir = Builder::new()
            .prefix("notesview-")
            .tempdir()
            .context("Failed to create page directory")?;
        let page_path = page_dir.path().join("notes.html");

        std::fs::write(&page_path, content)
            .with_context(|| format!("Failed to write page to {}", page_path.display()))?;
        debug!(path = %page_path.display(), bytes = content.len(), "Wrote notes page");

        self.page_dir = Some(page_dir);
        Ok(page_path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn open_in_browser(&mut self, path: &Path) -> Result<()> {
        opener(path.as_os_str())
            .spawn()
            .with_context(|| format!("Failed to open {} in the browser", path.display()))?;

        // The page directory is removed on drop
        std::thread::sleep(Duration::from_millis(BROWSER_LAUNCH_DELAY_MS));
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener(target: &OsStr) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(target_os = "windows")]
fn opener(target: &OsStr) -> Command {
    let mut command = Command::new("cmd");
    command.args([OsStr::new("/C"), OsStr::new("start"), OsStr::new(""), target]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(target: &OsStr) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
