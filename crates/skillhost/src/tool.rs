//! Invocable tools and their descriptors.
//!
//! A [`ToolDescriptor`] is the statically declared registration record for
//! one callable: identifier, optional name/description overrides, parameter
//! descriptors and the handler itself. Module loaders return descriptors;
//! discovery turns them into [`Tool`]s.

use crate::error::SkillError;
use crate::schema::{build_schema, schema_to_json, ParamSpec, Parameter};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Synchronous tool handler. Receives the validated argument object.
pub type ToolHandler = Arc<dyn Fn(Value) -> Result<String, SkillError> + Send + Sync>;

/// Registration record for one tool callable.
#[derive(Clone)]
pub struct ToolDescriptor {
    /// The callable's identifier; the tool name when no override is given.
    pub ident: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Documentation text; its trimmed form is the description fallback.
    pub doc: Option<String>,
    pub return_direct: bool,
    pub params: Vec<ParamSpec>,
    pub handler: ToolHandler,
}

impl ToolDescriptor {
    pub fn new(
        ident: impl Into<String>,
        handler: impl Fn(Value) -> Result<String, SkillError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ident: ident.into(),
            name: None,
            description: None,
            doc: None,
            return_direct: false,
            params: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn return_direct(mut self, return_direct: bool) -> Self {
        self.return_direct = return_direct;
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("ident", &self.ident)
            .field("name", &self.name)
            .field("return_direct", &self.return_direct)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// One invocable operation exposed by a skill. Built fresh on every
/// discovery call and owned by the caller.
#[derive(Clone)]
pub struct Tool {
    pub name: String,
    pub description: String,
    /// Whether the result is a final answer rather than an intermediate one.
    pub return_direct: bool,
    pub schema: Vec<Parameter>,
    handler: ToolHandler,
}

impl Tool {
    pub fn from_descriptor(descriptor: &ToolDescriptor) -> Self {
        let name = descriptor
            .name
            .clone()
            .unwrap_or_else(|| descriptor.ident.clone());
        let description = descriptor
            .description
            .clone()
            .or_else(|| descriptor.doc.as_ref().map(|d| d.trim().to_string()))
            .unwrap_or_default();
        Self {
            name,
            description,
            return_direct: descriptor.return_direct,
            schema: build_schema(&descriptor.params),
            handler: descriptor.handler.clone(),
        }
    }

    /// Validate arguments against the schema and call the handler.
    ///
    /// Missing required arguments and unknown argument names are rejected;
    /// absent optional arguments receive an independent clone of their
    /// declared default on every invocation.
    pub fn invoke(&self, args: Value) -> Result<String, SkillError> {
        let mut args = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(SkillError::InvalidInput(format!(
                    "tool '{}' expects an argument object, got {}",
                    self.name, other
                )));
            }
        };
        for key in args.keys() {
            if !self.schema.iter().any(|p| &p.name == key) {
                return Err(SkillError::InvalidInput(format!(
                    "unknown argument '{}' for tool '{}'",
                    key, self.name
                )));
            }
        }
        for param in &self.schema {
            if args.contains_key(&param.name) {
                continue;
            }
            if param.required {
                return Err(SkillError::InvalidInput(format!(
                    "missing required argument '{}' for tool '{}'",
                    param.name, self.name
                )));
            }
            if let Some(default) = &param.default {
                args.insert(param.name.clone(), default.clone());
            }
        }
        (self.handler)(Value::Object(args))
    }

    /// Definition object for a chat-completion layer.
    pub fn definition(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": schema_to_json(&self.schema),
        })
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("return_direct", &self.return_direct)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo_descriptor() -> ToolDescriptor {
        ToolDescriptor::new("echo", |args| Ok(args.to_string()))
            .doc("  Echo the arguments back.  ")
            .param(ParamSpec::new("text").typed("str"))
            .param(ParamSpec::new("repeat").typed("int").default_value(json!(1)))
    }

    #[test]
    fn name_defaults_to_ident() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        assert_eq!(tool.name, "echo");
    }

    #[test]
    fn explicit_name_overrides_ident() {
        let tool = Tool::from_descriptor(&echo_descriptor().name("repeat_text"));
        assert_eq!(tool.name, "repeat_text");
    }

    #[test]
    fn description_falls_back_to_trimmed_doc() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        assert_eq!(tool.description, "Echo the arguments back.");

        let tool = Tool::from_descriptor(&echo_descriptor().description("Explicit."));
        assert_eq!(tool.description, "Explicit.");
    }

    #[test]
    fn invoke_fills_defaults_independently() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        let out = tool.invoke(json!({"text": "hi"})).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["repeat"], json!(1));
    }

    #[test]
    fn invoke_rejects_missing_required() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        let err = tool.invoke(json!({"repeat": 3})).unwrap_err();
        assert!(matches!(err, SkillError::InvalidInput(_)));
    }

    #[test]
    fn invoke_rejects_unknown_argument() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        let err = tool.invoke(json!({"text": "hi", "bogus": 1})).unwrap_err();
        assert!(matches!(err, SkillError::InvalidInput(_)));
    }

    #[test]
    fn invoke_rejects_non_object_arguments() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        let err = tool.invoke(json!("just a string")).unwrap_err();
        assert!(matches!(err, SkillError::InvalidInput(_)));
    }

    #[test]
    fn null_arguments_work_for_parameterless_tools() {
        let descriptor = ToolDescriptor::new("ping", |_| Ok("pong".into()));
        let tool = Tool::from_descriptor(&descriptor);
        assert_eq!(tool.invoke(Value::Null).unwrap(), "pong");
    }

    #[test]
    fn definition_carries_schema() {
        let tool = Tool::from_descriptor(&echo_descriptor());
        let def = tool.definition();
        assert_eq!(def["name"], "echo");
        assert_eq!(def["parameters"]["properties"]["text"]["type"], "string");
        assert_eq!(def["parameters"]["required"], json!(["text"]));
    }
}
