//! Skill registry: scanning, lookup, access filtering and the prompt
//! manifest.
//!
//! A registry instance owns one base folder. `scan` builds a complete
//! snapshot of that folder and swaps it in atomically, so readers always
//! see either the previous catalog or the new one, never a mix.

use crate::discovery;
use crate::error::SkillError;
use crate::module::ModuleRegistry;
use crate::parser::{self, SKILL_FILENAME};
use crate::resources;
use crate::tool::Tool;
use crate::types::SkillMetadata;
use arc_swap::ArcSwap;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One skill directory that failed to load during a scan.
#[derive(Debug)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub error: SkillError,
}

/// Outcome of one scan pass. Failures never abort the scan; they land
/// here instead.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Names of the skills in the new catalog, sorted.
    pub discovered: Vec<String>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

type Catalog = BTreeMap<String, Arc<SkillMetadata>>;

/// Registry of the skills under one base folder.
pub struct SkillRegistry {
    base_path: PathBuf,
    modules: Arc<ModuleRegistry>,
    skills: ArcSwap<Catalog>,
}

impl SkillRegistry {
    /// Create an empty registry. Call [`scan`](Self::scan) to populate it.
    pub fn new(base_path: impl Into<PathBuf>, modules: Arc<ModuleRegistry>) -> Self {
        Self {
            base_path: base_path.into(),
            modules,
            skills: ArcSwap::from_pointee(Catalog::new()),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Scan the base folder and replace the catalog with what was found.
    ///
    /// A directory qualifies as a skill iff it contains `SKILL.md`.
    /// Directories are visited in sorted order; when two resolve to the
    /// same name the later one wins. A directory that fails to load is
    /// recorded as a diagnostic and skipped, leaving its siblings intact.
    /// A missing base folder yields an empty catalog.
    pub fn scan(&self) -> ScanReport {
        let mut report = ScanReport::default();
        let mut catalog = Catalog::new();

        let entries = match std::fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "skill base path {} is not readable: {}",
                    self.base_path.display(),
                    e
                );
                self.skills.store(Arc::new(catalog));
                return report;
            }
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(SKILL_FILENAME).is_file())
            .collect();
        dirs.sort();

        for dir in dirs {
            match parser::load_skill_dir(&dir) {
                Ok(metadata) => {
                    let name = metadata.name().to_string();
                    if let Some(previous) = catalog.insert(name.clone(), Arc::new(metadata)) {
                        log::warn!(
                            "skill name '{}' claimed by both {} and {}; keeping the latter",
                            name,
                            previous.skill_path.display(),
                            dir.display()
                        );
                    }
                }
                Err(error) => {
                    log::warn!("skipping skill at {}: {}", dir.display(), error);
                    report.diagnostics.push(ScanDiagnostic { path: dir, error });
                }
            }
        }

        report.discovered = catalog.keys().cloned().collect();
        log::info!(
            "scanned {}: {} skill(s), {} problem(s)",
            self.base_path.display(),
            report.discovered.len(),
            report.diagnostics.len()
        );
        self.skills.store(Arc::new(catalog));
        report
    }

    /// Look up a skill by resolved name.
    pub fn get(&self, name: &str) -> Result<Arc<SkillMetadata>, SkillError> {
        self.skills
            .load()
            .get(name)
            .cloned()
            .ok_or_else(|| SkillError::not_found(name))
    }

    /// List skills, sorted by name.
    ///
    /// `None` lists everything; `Some(groups)` keeps only skills whose
    /// access policy admits those groups. `Some(&[])` therefore keeps only
    /// unrestricted skills.
    pub fn list(&self, caller_groups: Option<&[String]>) -> Vec<Arc<SkillMetadata>> {
        self.skills
            .load()
            .values()
            .filter(|skill| match caller_groups {
                None => true,
                Some(groups) => skill.access_policy().allows(groups),
            })
            .cloned()
            .collect()
    }

    /// Look up a skill and enforce its access policy against the caller.
    pub fn authorize(
        &self,
        name: &str,
        caller_groups: &[String],
    ) -> Result<Arc<SkillMetadata>, SkillError> {
        let skill = self.get(name)?;
        if skill.access_policy().allows(caller_groups) {
            Ok(skill)
        } else {
            Err(SkillError::AccessDenied {
                skill: name.to_string(),
            })
        }
    }

    /// XML manifest of the accessible skills, for prompt injection.
    ///
    /// Entries are sorted by name; an empty listing collapses to a single
    /// self-closing-style pair with no inner whitespace.
    pub fn manifest(&self, caller_groups: Option<&[String]>) -> String {
        let skills = self.list(caller_groups);
        if skills.is_empty() {
            return "<available_skills></available_skills>".to_string();
        }

        let mut parts = vec!["<available_skills>".to_string()];
        for skill in &skills {
            parts.push(format!(
                "  <skill>\n    <name>{}</name>\n    <description>{}</description>\n    <location>{}</location>\n  </skill>",
                skill.name(),
                skill.description(),
                skill.skill_path.display()
            ));
        }
        parts.push("</available_skills>".to_string());
        parts.join("\n")
    }

    /// Tools declared by a skill's script modules.
    pub fn discover_tools(&self, name: &str) -> Result<Vec<Tool>, SkillError> {
        let skill = self.get(name)?;
        discovery::discover_tools(&skill, &self.modules)
    }

    /// Full tool set of a skill: discovered tools followed by the built-in
    /// resource tools. A discovered tool shadowing a resource tool's name
    /// is rejected rather than silently dropped.
    pub fn tools(&self, name: &str) -> Result<Vec<Tool>, SkillError> {
        let skill = self.get(name)?;
        let mut tools = discovery::discover_tools(&skill, &self.modules)?;
        let mut seen: HashSet<String> = tools.iter().map(|t| t.name.clone()).collect();
        for tool in resources::resource_tools(&skill) {
            if !seen.insert(tool.name.clone()) {
                return Err(SkillError::DuplicateTool {
                    skill: skill.name().to_string(),
                    tool: tool.name,
                });
            }
            tools.push(tool);
        }
        Ok(tools)
    }
}

impl std::fmt::Debug for SkillRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillRegistry")
            .field("base_path", &self.base_path)
            .field("skills", &self.skills.load().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
