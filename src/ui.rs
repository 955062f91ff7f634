//! Capability interface between the widget core and its host surface

use crate::Result;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::error;

/// A display area whose whole content can be replaced
pub trait Surface: Send + Sync {
    /// Replace everything currently shown with `content`
    fn display(&self, content: String);
}

/// User interaction with the search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text of the search field changed
    Changed(String),
    /// Enter was pressed or the search button activated; carries the field text
    Submit(String),
}

/// Surface that remembers every frame it was asked to show
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frames: Mutex<Vec<String>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything displayed so far, oldest first
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// What is on screen right now
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Surface for RecordingSurface {
    fn display(&self, content: String) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(content);
    }
}

/// Surface that overwrites a file with every frame
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Replace the file contents with `content`
    pub fn write_frame(&self, content: &str) -> Result<()> {
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Surface for FileSurface {
    fn display(&self, content: String) {
        if let Err(e) = self.write_frame(&content) {
            error!("{} ({}): {}", e.user_message(), self.path.display(), e);
        }
    }
}
