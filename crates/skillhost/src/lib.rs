//! Skill package discovery and tool registration.
//!
//! A skill is a directory containing a `SKILL.md` instructions document,
//! an optional `config.yaml`, optional `scripts/` modules that declare
//! tools, and optional `references/` and `assets/` resource folders.
//!
//! The [`SkillRegistry`] scans a base folder for such directories,
//! enforces group-based access policies, renders an XML manifest for
//! prompt injection and assembles each skill's tool set from
//! host-registered [`ModuleRegistry`] loaders plus the built-in resource
//! tools.
//!
//! ```no_run
//! use skillhost::{ModuleRegistry, SkillRegistry};
//! use std::sync::Arc;
//!
//! let modules = Arc::new(ModuleRegistry::new());
//! let registry = SkillRegistry::new("/srv/skills", modules);
//! let report = registry.scan();
//! for name in &report.discovered {
//!     println!("skill: {}", name);
//! }
//! println!("{}", registry.manifest(None));
//! ```

pub mod access;
pub mod discovery;
pub mod error;
pub mod module;
pub mod parser;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod tool;
pub mod types;

pub use access::AccessPolicy;
pub use discovery::SCRIPTS_DIR;
pub use error::SkillError;
pub use module::{ModuleLoader, ModuleRegistry};
pub use parser::{parse_instructions, CONFIG_FILENAME, SKILL_FILENAME};
pub use registry::{ScanDiagnostic, ScanReport, SkillRegistry};
pub use resources::{resource_tools, ASSETS_DIR, REFERENCES_DIR};
pub use schema::{build_schema, schema_to_json, ParamSpec, ParamType, Parameter};
pub use tool::{Tool, ToolDescriptor, ToolHandler};
pub use types::{Frontmatter, GenericSettings, SkillConfig, SkillMetadata, SkillType};
