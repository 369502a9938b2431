//! Parameter descriptors and input schema generation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Primitive JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    /// The JSON Schema name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
        }
    }

    /// Parse a JSON Schema type name. Unknown names fall back to `string`.
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "number" | "float" | "double" => ParamType::Number,
            "integer" | "int" => ParamType::Integer,
            "boolean" | "bool" => ParamType::Boolean,
            "object" => ParamType::Object,
            "array" => ParamType::Array,
            _ => ParamType::String,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ParamType::from_type_name(&name))
    }
}

/// Maps a Rust value kind onto the JSON type a tool parameter declares.
///
/// `Option<T>` reports the inner type and marks the parameter optional.
pub trait ParamKind {
    const TYPE: ParamType;
    const REQUIRED: bool = true;
}

macro_rules! param_kind {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(impl ParamKind for $ty {
            const TYPE: ParamType = $kind;
        })+
    };
}

param_kind!(ParamType::String => String, &str, char, serde_json::Value);
param_kind!(ParamType::Boolean => bool);
param_kind!(ParamType::Number => f32, f64);
param_kind!(ParamType::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
param_kind!(ParamType::Object => serde_json::Map<String, serde_json::Value>);

impl<T> ParamKind for Vec<T> {
    const TYPE: ParamType = ParamType::Array;
}

impl<T> ParamKind for &[T] {
    const TYPE: ParamType = ParamType::Array;
}

impl<V> ParamKind for HashMap<String, V> {
    const TYPE: ParamType = ParamType::Object;
}

impl<V> ParamKind for BTreeMap<String, V> {
    const TYPE: ParamType = ParamType::Object;
}

impl<T: ParamKind> ParamKind for Option<T> {
    const TYPE: ParamType = T::TYPE;
    const REQUIRED: bool = false;
}

fn default_required() -> bool {
    true
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamDescriptor {
    /// A required string parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::String,
            required: true,
            description: None,
        }
    }

    /// A parameter whose type and required flag come from the Rust type `T`.
    pub fn of<T: ParamKind + ?Sized>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: T::TYPE,
            required: T::REQUIRED,
            description: None,
        }
    }

    pub fn with_type(self, param_type: ParamType) -> Self {
        Self { param_type, ..self }
    }

    pub fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    pub fn describe(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }
}

/// Type and description of a single schema property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// JSON-Schema-like contract for a tool's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, PropertyDescriptor>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Derive the schema for an ordered parameter list.
    ///
    /// Every parameter becomes a property; `required` lists the parameters
    /// not marked optional, in declaration order. When a name repeats, the
    /// first declaration wins.
    pub fn generate(params: &[ParamDescriptor]) -> Self {
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        for param in params {
            if properties.contains_key(&param.name) {
                continue;
            }
            properties.insert(
                param.name.clone(),
                PropertyDescriptor {
                    param_type: param.param_type,
                    description: param.description.clone(),
                },
            );
            if param.required {
                required.push(param.name.clone());
            }
        }

        Self {
            schema_type: "object".to_string(),
            properties,
            required,
        }
    }

    /// Declared type of a property, if the schema has it.
    pub fn property_type(&self, name: &str) -> Option<ParamType> {
        self.properties.get(name).map(|p| p.param_type)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::generate(&[])
    }
}
