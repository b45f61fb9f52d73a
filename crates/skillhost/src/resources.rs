//! Built-in resource access tools.
//!
//! Every skill with resource tools enabled gets the same three tools bound
//! to its `references/` and `assets/` folders: `read_reference`,
//! `read_asset` and `list_resources`.

use crate::error::SkillError;
use crate::schema::ParamSpec;
use crate::tool::{Tool, ToolDescriptor};
use crate::types::SkillMetadata;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};

pub const REFERENCES_DIR: &str = "references";
pub const ASSETS_DIR: &str = "assets";

/// Extensions served as text by `read_asset`; everything else gets a
/// size placeholder instead of raw bytes.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "json", "yaml", "yml", "csv"];

/// Build the three resource tools for a skill, or none when the skill's
/// config disables them.
pub fn resource_tools(skill: &SkillMetadata) -> Vec<Tool> {
    if !skill.resource_tools_enabled() {
        return Vec::new();
    }

    let references = skill.skill_path.join(REFERENCES_DIR);
    let assets = skill.skill_path.join(ASSETS_DIR);

    let read_reference = {
        let references = references.clone();
        ToolDescriptor::new("read_reference", move |args| {
            let filename = filename_arg(&args)?;
            let path = resolve_resource(&references, filename)?;
            if !path.is_file() {
                return Err(SkillError::ResourceNotFound {
                    file: filename.to_string(),
                });
            }
            Ok(std::fs::read_to_string(path)?)
        })
        .description("Read a reference document from the skill's references/ directory")
        .param(ParamSpec::new("filename").typed("str"))
    };

    let read_asset = {
        let assets = assets.clone();
        ToolDescriptor::new("read_asset", move |args| {
            let filename = filename_arg(&args)?;
            let path = resolve_resource(&assets, filename)?;
            if !path.is_file() {
                return Err(SkillError::ResourceNotFound {
                    file: filename.to_string(),
                });
            }
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            if TEXT_EXTENSIONS.contains(&extension.as_str()) {
                Ok(std::fs::read_to_string(path)?)
            } else {
                let size = std::fs::metadata(&path)?.len();
                Ok(format!("Asset file (binary): {}, size: {} bytes", filename, size))
            }
        })
        .description("Read an asset file from the skill's assets/ directory")
        .param(ParamSpec::new("filename").typed("str"))
    };

    let list_resources = ToolDescriptor::new("list_resources", move |_args| {
        let mut lines = Vec::new();
        if let Some(names) = list_files(&references) {
            if !names.is_empty() {
                lines.push("References:".to_string());
                lines.extend(names.iter().map(|n| format!("  - {}", n)));
            }
        }
        if let Some(names) = list_files(&assets) {
            if !names.is_empty() {
                lines.push("\nAssets:".to_string());
                lines.extend(names.iter().map(|n| format!("  - {}", n)));
            }
        }
        if lines.is_empty() {
            Ok("No resources available".to_string())
        } else {
            Ok(lines.join("\n"))
        }
    })
    .description("List all available reference documents and asset files");

    vec![
        Tool::from_descriptor(&read_reference),
        Tool::from_descriptor(&read_asset),
        Tool::from_descriptor(&list_resources),
    ]
}

fn filename_arg(args: &Value) -> Result<&str, SkillError> {
    args["filename"]
        .as_str()
        .ok_or_else(|| SkillError::InvalidInput("'filename' argument required".into()))
}

/// Join a user-supplied filename onto a resource root, rejecting anything
/// that could escape it before touching the filesystem.
fn resolve_resource(root: &Path, filename: &str) -> Result<PathBuf, SkillError> {
    let relative = Path::new(filename);
    if relative.is_absolute() {
        return Err(SkillError::InvalidInput(format!(
            "absolute resource path not allowed: {}",
            filename
        )));
    }
    for component in relative.components() {
        match component {
            Component::Normal(_) => {}
            _ => {
                return Err(SkillError::InvalidInput(format!(
                    "resource path escapes its folder: {}",
                    filename
                )));
            }
        }
    }
    Ok(root.join(relative))
}

/// Sorted file names in a folder, or `None` when the folder is absent.
fn list_files(dir: &Path) -> Option<Vec<String>> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Some(names)
}
