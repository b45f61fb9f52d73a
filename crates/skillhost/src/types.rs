//! Core skill data structures.

use crate::access::AccessPolicy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Skill category from `config.yaml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    #[default]
    Generic,
    Custom,
}

impl SkillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Custom => "custom",
        }
    }
}

/// `generic_settings` block of `config.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenericSettings {
    pub auto_discover_tools: bool,
    pub enable_resource_tools: bool,
    /// Unrecognized settings are kept rather than rejected.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for GenericSettings {
    fn default() -> Self {
        Self {
            auto_discover_tools: true,
            enable_resource_tools: true,
            extra: BTreeMap::new(),
        }
    }
}

/// Parsed `config.yaml`. Every field is optional; an absent file is an
/// empty config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub skill_type: SkillType,
    pub user_group: Vec<String>,
    pub admin_group: Vec<String>,
    pub generic_settings: GenericSettings,
    /// Extension fields (`version`, `runtime`, ...) survive parsing.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// YAML frontmatter of the instructions document. Parsed leniently: a
/// malformed block degrades to the empty mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Metadata for one skill directory, built during a registry scan and
/// replaced wholesale on rescan.
#[derive(Debug, Clone)]
pub struct SkillMetadata {
    name: String,
    pub skill_path: PathBuf,
    pub config: SkillConfig,
    pub instructions_metadata: Frontmatter,
    pub instructions_body: String,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl SkillMetadata {
    /// Resolves the name with precedence config > frontmatter > directory
    /// basename. Empty strings do not win the precedence race.
    pub fn new(
        skill_path: PathBuf,
        config: SkillConfig,
        instructions_metadata: Frontmatter,
        instructions_body: String,
    ) -> Self {
        let name = non_empty(config.name.as_deref())
            .or_else(|| non_empty(instructions_metadata.name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                skill_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| skill_path.display().to_string())
            });
        Self {
            name,
            skill_path,
            config,
            instructions_metadata,
            instructions_body,
        }
    }

    /// Resolved name. Immutable for the metadata's lifetime.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description with the same precedence chain as the name; may be empty.
    pub fn description(&self) -> &str {
        non_empty(self.config.description.as_deref())
            .or_else(|| non_empty(self.instructions_metadata.description.as_deref()))
            .unwrap_or("")
    }

    pub fn skill_type(&self) -> SkillType {
        self.config.skill_type
    }

    pub fn user_groups(&self) -> &[String] {
        &self.config.user_group
    }

    pub fn admin_groups(&self) -> &[String] {
        &self.config.admin_group
    }

    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::new(self.config.user_group.clone(), self.config.admin_group.clone())
    }

    pub fn has_access_control(&self) -> bool {
        !self.config.user_group.is_empty() || !self.config.admin_group.is_empty()
    }

    pub fn auto_discover_tools(&self) -> bool {
        self.config.generic_settings.auto_discover_tools
    }

    pub fn resource_tools_enabled(&self) -> bool {
        self.config.generic_settings.enable_resource_tools
    }
}
