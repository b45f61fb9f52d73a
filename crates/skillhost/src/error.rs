//! Structured error type for the skill host.
//!
//! Scan-level problems are isolated per skill and surfaced as diagnostics
//! (see [`crate::registry::ScanReport`]); only lookup misses, load failures
//! and explicit access/input violations reach callers as hard errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkillError {
    #[error("skill '{name}' not found")]
    NotFound { name: String },

    #[error("resource file not found: {file}")]
    ResourceNotFound { file: String },

    #[error("invalid config at {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("access to skill '{skill}' denied")]
    AccessDenied { skill: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to load module '{module}': {reason}")]
    Load { module: String, reason: String },

    #[error("duplicate tool '{tool}' in skill '{skill}'")]
    DuplicateTool { skill: String, tool: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SkillError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn load(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            module: module.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(
            SkillError::not_found("calendar-assistant").to_string(),
            "skill 'calendar-assistant' not found"
        );
        assert_eq!(
            SkillError::load("calendar_skill", "no loader registered").to_string(),
            "failed to load module 'calendar_skill': no loader registered"
        );
        assert_eq!(
            SkillError::DuplicateTool {
                skill: "cal".into(),
                tool: "create_ics_file".into(),
            }
            .to_string(),
            "duplicate tool 'create_ics_file' in skill 'cal'"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SkillError = io.into();
        assert!(matches!(err, SkillError::Io(_)));
    }
}
