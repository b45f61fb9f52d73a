//! Parameter schemas for tools.
//!
//! Schemas are built from explicit parameter descriptors authored alongside
//! each tool, not inferred from signatures. An unrecognized declared type
//! degrades that single parameter to `any`; building never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic parameter type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    List,
    Map,
    #[default]
    Any,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Map => "map",
            Self::Any => "any",
        }
    }

    /// Map a declared type name to a semantic type. Accepts the common
    /// spellings used in tool descriptors; anything else degrades to `any`.
    pub fn from_decl(decl: &str) -> Self {
        match decl.to_ascii_lowercase().as_str() {
            "str" | "string" => Self::String,
            "int" | "integer" | "float" | "number" => Self::Number,
            "bool" | "boolean" => Self::Boolean,
            "list" | "array" => Self::List,
            "dict" | "map" | "object" => Self::Map,
            "any" => Self::Any,
            other => {
                log::debug!("unrecognized parameter type '{}', using any", other);
                Self::Any
            }
        }
    }
}

/// Authored description of one parameter, used to build a [`Parameter`].
#[derive(Debug, Clone, Default)]
pub struct ParamSpec {
    pub name: String,
    /// Declared type name; `None` means unannotated.
    pub declared: Option<String>,
    /// Declared default; its presence makes the parameter optional.
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: None,
            default: None,
        }
    }

    pub fn typed(mut self, decl: impl Into<String>) -> Self {
        self.declared = Some(decl.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// One entry in a tool's ordered input schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Parameter {
    pub fn to_json_schema(&self) -> Value {
        let mut schema = serde_json::json!({
            "type": self.param_type.as_str(),
        });
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// Build an ordered schema from parameter descriptors. Deterministic for a
/// fixed input and involves no I/O; defaults are cloned so no two builds
/// share a value.
pub fn build_schema(params: &[ParamSpec]) -> Vec<Parameter> {
    params
        .iter()
        .map(|spec| Parameter {
            name: spec.name.clone(),
            param_type: spec
                .declared
                .as_deref()
                .map(ParamType::from_decl)
                .unwrap_or_default(),
            required: spec.default.is_none(),
            default: spec.default.clone(),
        })
        .collect()
}

/// JSON-schema-shaped object for handing a tool to a chat-completion layer.
pub fn schema_to_json(params: &[Parameter]) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for param in params {
        properties.insert(param.name.clone(), param.to_json_schema());
        if param.required {
            required.push(Value::String(param.name.clone()));
        }
    }
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_iff_no_default() {
        let schema = build_schema(&[
            ParamSpec::new("topic").typed("str"),
            ParamSpec::new("num_ideas").typed("int").default_value(json!(5)),
        ]);
        assert!(schema[0].required);
        assert!(!schema[1].required);
        assert_eq!(schema[1].default, Some(json!(5)));
    }

    #[test]
    fn declared_types_map_to_semantic_types() {
        assert_eq!(ParamType::from_decl("str"), ParamType::String);
        assert_eq!(ParamType::from_decl("float"), ParamType::Number);
        assert_eq!(ParamType::from_decl("BOOL"), ParamType::Boolean);
        assert_eq!(ParamType::from_decl("list"), ParamType::List);
        assert_eq!(ParamType::from_decl("dict"), ParamType::Map);
    }

    #[test]
    fn unrecognized_or_missing_type_degrades_to_any() {
        assert_eq!(ParamType::from_decl("Optional[Dict[str, int]]"), ParamType::Any);
        let schema = build_schema(&[ParamSpec::new("whatever")]);
        assert_eq!(schema[0].param_type, ParamType::Any);
    }

    #[test]
    fn order_is_preserved() {
        let schema = build_schema(&[
            ParamSpec::new("summary"),
            ParamSpec::new("start_date"),
            ParamSpec::new("duration_hours"),
        ]);
        let names: Vec<&str> = schema.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["summary", "start_date", "duration_hours"]);
    }

    #[test]
    fn defaults_are_independent_copies() {
        let spec = [ParamSpec::new("items")
            .typed("list")
            .default_value(json!(["a"]))];
        let mut first = build_schema(&spec);
        let second = build_schema(&spec);
        if let Some(Value::Array(items)) = first[0].default.as_mut() {
            items.push(json!("mutated"));
        }
        assert_eq!(second[0].default, Some(json!(["a"])));
    }

    #[test]
    fn json_schema_shape() {
        let schema = build_schema(&[
            ParamSpec::new("location").typed("str"),
            ParamSpec::new("creativity").typed("float").default_value(json!(0.7)),
        ]);
        let json = schema_to_json(&schema);
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["location"]["type"], "string");
        assert_eq!(json["properties"]["creativity"]["default"], json!(0.7));
        assert_eq!(json["required"], json!(["location"]));
    }
}
