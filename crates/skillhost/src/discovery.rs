//! Tool discovery over a skill's `scripts/` folder.

use crate::error::SkillError;
use crate::module::ModuleRegistry;
use crate::tool::Tool;
use crate::types::SkillMetadata;
use std::collections::HashSet;
use std::path::PathBuf;

pub const SCRIPTS_DIR: &str = "scripts";

/// Package-internal naming convention; such files are never modules.
const INTERNAL_PREFIX: &str = "__";

/// Collect the tools declared by a skill's script modules.
///
/// Scans `scripts/` non-recursively in sorted file order, skipping
/// `__`-prefixed and hidden files, and invokes the registered loader for
/// each module. Tools come back in module-then-declaration order. A module
/// without a registered loader, or whose loader fails, is a hard `Load`
/// error rather than a silent omission; duplicate tool names within the
/// skill are rejected.
pub fn discover_tools(
    skill: &SkillMetadata,
    modules: &ModuleRegistry,
) -> Result<Vec<Tool>, SkillError> {
    if !skill.auto_discover_tools() {
        return Ok(Vec::new());
    }

    let scripts_dir = skill.skill_path.join(SCRIPTS_DIR);
    if !scripts_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(&scripts_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| !n.starts_with(INTERNAL_PREFIX) && !n.starts_with('.'))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut tools = Vec::new();
    let mut seen = HashSet::new();
    for file in files {
        let module = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let loader = modules.find(&module).ok_or_else(|| {
            SkillError::load(&module, "no loader registered for this module")
        })?;
        let descriptors = loader().map_err(|e| match e {
            load @ SkillError::Load { .. } => load,
            other => SkillError::load(&module, other.to_string()),
        })?;

        log::debug!(
            "module '{}' of skill '{}' declared {} tool(s)",
            module,
            skill.name(),
            descriptors.len()
        );

        for descriptor in &descriptors {
            let tool = Tool::from_descriptor(descriptor);
            if !seen.insert(tool.name.clone()) {
                return Err(SkillError::DuplicateTool {
                    skill: skill.name().to_string(),
                    tool: tool.name,
                });
            }
            tools.push(tool);
        }
    }

    Ok(tools)
}
