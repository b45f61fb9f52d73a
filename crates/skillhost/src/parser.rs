//! Parsing of the on-disk skill layout: the `SKILL.md` instructions
//! document (optional YAML frontmatter + body) and `config.yaml`.

use crate::error::SkillError;
use crate::types::{Frontmatter, SkillConfig, SkillMetadata};
use std::fs;
use std::path::Path;

/// Marker document: a directory qualifies as a skill iff this file exists.
pub const SKILL_FILENAME: &str = "SKILL.md";
pub const CONFIG_FILENAME: &str = "config.yaml";

const FRONTMATTER_DELIMITER: &str = "---";

/// Split an instructions document into frontmatter and body.
///
/// If the content begins with the delimiter, the text up to the second
/// delimiter is parsed as a YAML mapping and the remainder becomes the
/// body. A malformed mapping degrades to the empty mapping; the body is
/// kept either way. Without a leading delimiter (or with fewer than two of
/// them) the whole content is the body.
pub fn parse_instructions(content: &str) -> (Frontmatter, String) {
    if content.starts_with(FRONTMATTER_DELIMITER) {
        let mut parts = content.splitn(3, FRONTMATTER_DELIMITER);
        parts.next();
        if let (Some(raw), Some(body)) = (parts.next(), parts.next()) {
            let metadata = match serde_yaml::from_str::<Option<Frontmatter>>(raw) {
                Ok(fm) => fm.unwrap_or_default(),
                Err(e) => {
                    log::warn!("malformed frontmatter, treating as empty: {}", e);
                    Frontmatter::default()
                }
            };
            return (metadata, body.trim().to_string());
        }
    }
    (Frontmatter::default(), content.to_string())
}

/// Load `config.yaml`. Absent or empty files yield the default config;
/// malformed YAML is a `Config` error for the caller to record.
pub fn load_config(path: &Path) -> Result<SkillConfig, SkillError> {
    if !path.is_file() {
        return Ok(SkillConfig::default());
    }
    let raw = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Option<SkillConfig>>(&raw) {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(e) => Err(SkillError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Load one skill directory into metadata. The caller has already checked
/// that [`SKILL_FILENAME`] exists.
pub fn load_skill_dir(dir: &Path) -> Result<SkillMetadata, SkillError> {
    let config = load_config(&dir.join(CONFIG_FILENAME))?;
    let content = fs::read_to_string(dir.join(SKILL_FILENAME))?;
    let (metadata, body) = parse_instructions(&content);
    Ok(SkillMetadata::new(dir.to_path_buf(), config, metadata, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_frontmatter_and_body() {
        let content = "---\nname: calendar-assistant\ndescription: Creates events\n---\n# Instructions\n\nDo the thing.\n";
        let (fm, body) = parse_instructions(content);
        assert_eq!(fm.name.as_deref(), Some("calendar-assistant"));
        assert_eq!(fm.description.as_deref(), Some("Creates events"));
        assert!(body.starts_with("# Instructions"));
        assert!(body.ends_with("Do the thing."));
    }

    #[test]
    fn no_leading_delimiter_means_no_frontmatter() {
        let content = "# Just instructions\n";
        let (fm, body) = parse_instructions(content);
        assert!(fm.name.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn single_delimiter_keeps_whole_content_as_body() {
        let content = "---\nname: incomplete\n";
        let (fm, body) = parse_instructions(content);
        assert!(fm.name.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn malformed_frontmatter_degrades_to_empty_mapping() {
        let content = "---\nname: [unclosed\n---\nbody text";
        let (fm, body) = parse_instructions(content);
        assert!(fm.name.is_none());
        assert_eq!(body, "body text");
    }

    #[test]
    fn empty_frontmatter_block() {
        let content = "---\n---\nbody";
        let (fm, body) = parse_instructions(content);
        assert!(fm.name.is_none());
        assert_eq!(body, "body");
    }

    #[test]
    fn frontmatter_extra_keys_are_kept() {
        let content = "---\nname: x\nversion: \"2.0\"\ntags:\n  - calendar\n---\nbody";
        let (fm, _) = parse_instructions(content);
        assert!(fm.extra.contains_key("version"));
        assert!(fm.extra.contains_key("tags"));
    }

    #[test]
    fn absent_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(config.name.is_none());
        assert!(config.generic_settings.auto_discover_tools);
    }

    #[test]
    fn empty_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "").unwrap();
        let config = load_config(&path).unwrap();
        assert!(config.name.is_none());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "name: [unclosed").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, SkillError::Config { .. }));
    }

    #[test]
    fn loads_full_skill_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "name: config-name\nuser_group:\n  - team-a\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(SKILL_FILENAME),
            "---\nname: fm-name\ndescription: from frontmatter\n---\nInstructions here.\n",
        )
        .unwrap();

        let meta = load_skill_dir(dir.path()).unwrap();
        assert_eq!(meta.name(), "config-name");
        assert_eq!(meta.description(), "from frontmatter");
        assert_eq!(meta.user_groups(), ["team-a".to_string()]);
        assert_eq!(meta.instructions_body, "Instructions here.");
    }

    #[test]
    fn skill_dir_without_config_uses_frontmatter_name() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SKILL_FILENAME),
            "---\nname: fm-only\n---\nBody.\n",
        )
        .unwrap();
        let meta = load_skill_dir(dir.path()).unwrap();
        assert_eq!(meta.name(), "fm-only");
    }
}
