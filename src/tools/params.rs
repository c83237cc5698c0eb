//! JSON-schema builder for tool arguments.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// A JSON-schema parameter description.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    String { description: Option<String> },
    Integer { description: Option<String> },
    Boolean { description: Option<String> },
    Object(ObjectParam),
}

/// An object schema. Extra properties are always disallowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectParam {
    description: Option<String>,
    properties: BTreeMap<String, Param>,
    required: Vec<String>,
}

impl Param {
    /// String parameter with a description
    pub fn string(description: impl Into<String>) -> Self {
        Self::String {
            description: Some(description.into()),
        }
    }

    /// Integer parameter with a description
    pub fn integer(description: impl Into<String>) -> Self {
        Self::Integer {
            description: Some(description.into()),
        }
    }

    /// Boolean parameter with a description
    pub fn boolean(description: impl Into<String>) -> Self {
        Self::Boolean {
            description: Some(description.into()),
        }
    }

    /// Render as a JSON-schema value
    pub fn to_value(&self) -> Value {
        match self {
            Self::String { description } => scalar("string", description),
            Self::Integer { description } => scalar("integer", description),
            Self::Boolean { description } => scalar("boolean", description),
            Self::Object(object) => object.to_value(),
        }
    }
}

fn scalar(kind: &str, description: &Option<String>) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!(kind));
    if let Some(description) = description {
        schema.insert("description".to_string(), json!(description));
    }
    Value::Object(schema)
}

impl ObjectParam {
    /// Create an empty object schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property the caller must always supply
    pub fn add_required_property(mut self, name: impl Into<String>, param: Param) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), param);
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Add a property the caller may omit
    pub fn add_optional_property(mut self, name: impl Into<String>, param: Param) -> Self {
        self.properties.insert(name.into(), param);
        self
    }

    /// Names of required properties, in insertion order
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Render as a JSON-schema value
    pub fn to_value(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        if let Some(description) = &self.description {
            schema.insert("description".to_string(), json!(description));
        }
        if !self.properties.is_empty() {
            let properties = self
                .properties
                .iter()
                .map(|(name, param)| (name.clone(), param.to_value()))
                .collect::<Map<_, _>>();
            schema.insert("properties".to_string(), Value::Object(properties));
        }
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        schema.insert("additionalProperties".to_string(), json!(false));
        Value::Object(schema)
    }
}

impl From<ObjectParam> for Param {
    fn from(object: ObjectParam) -> Self {
        Self::Object(object)
    }
}
