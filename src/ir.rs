//! Strongly-typed service IR. Read-only input to the closure resolver and renderer.
//!
//! The JSON form is camelCase and mirrors the structs below one-to-one; the
//! `types`, `enums` and `unions` maps are written as lists and keyed by `name`.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub title: String,
    #[serde(default)]
    pub source_path: Option<String>,
    /// Used only for output path policy.
    #[serde(default = "default_major_version")]
    pub major_version: u32,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default, deserialize_with = "keyed_by_name")]
    pub types: IndexMap<String, Type>,
    #[serde(default, deserialize_with = "keyed_by_name")]
    pub enums: IndexMap<String, Enum>,
    #[serde(default, deserialize_with = "keyed_by_name")]
    pub unions: IndexMap<String, Union>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<ReturnValue>,
}

/// Parameters and properties share one shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
    #[serde(flatten)]
    pub ty: TypeRef,
}

pub type Property = Parameter;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnValue {
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(flatten)]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(flatten)]
    pub target: Target,
    #[serde(default)]
    pub is_array: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Primitive { primitive: Primitive },
    Named {
        #[serde(rename = "typeName")]
        name: String,
    },
}

/// Primitive kinds. Spellings outside the known set are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Primitive {
    String,
    Number,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    DateTime,
    Null,
    Untyped,
    Other(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub name: String,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub map_properties: Option<MapProperties>,
}

/// Dictionary facet of a type.
#[derive(Debug, Clone, Deserialize)]
pub struct MapProperties {
    pub key: TypeRef,
    pub value: TypeRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub name: String,
    #[serde(default)]
    pub members: Vec<TypeRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub docs: Option<EnumDocs>,
}

/// Documentation extension attached to an enum by the parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumDocs {
    #[serde(default)]
    pub description: Option<Description>,
    /// Literal value → description.
    #[serde(default)]
    pub values: IndexMap<String, Description>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "id", rename_all = "kebab-case")]
pub enum ValidationRule {
    ArrayMaxItems { max: f64 },
    ArrayMinItems { min: f64 },
    ArrayUniqueItems,
    #[serde(rename = "number-gt")]
    NumberGreaterThan { value: f64 },
    #[serde(rename = "number-gte")]
    NumberGreaterOrEqual { value: f64 },
    #[serde(rename = "number-lt")]
    NumberLessThan { value: f64 },
    #[serde(rename = "number-lte")]
    NumberLessOrEqual { value: f64 },
    NumberMultipleOf { value: f64 },
    StringMaxLength { length: f64 },
    StringMinLength { length: f64 },
    StringPattern { pattern: String },
    /// Rule kinds this renderer does not know about yet.
    #[serde(other)]
    Unknown,
}

/// A named reference resolved against the service maps.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Type(&'a Type),
    Enum(&'a Enum),
    Union(&'a Union),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid service IR at JSON path {path}: {message}")]
    Parse { path: String, message: String },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Service {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Deserialize with JSON-path context in error messages.
    pub fn from_json_str(src: &str) -> Result<Self, LoadError> {
        let de = &mut serde_json::Deserializer::from_str(src);
        serde_path_to_error::deserialize::<_, Self>(de).map_err(|err| LoadError::Parse {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    /// Type wins over Enum, Enum over Union when a name is declared twice.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(ty) = self.types.get(name) {
            return Some(Resolved::Type(ty));
        }
        if let Some(en) = self.enums.get(name) {
            return Some(Resolved::Enum(en));
        }
        self.unions.get(name).map(Resolved::Union)
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}

impl TypeRef {
    pub fn primitive(primitive: Primitive) -> Self {
        Self { target: Target::Primitive { primitive }, is_array: false }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { target: Target::Named { name: name.into() }, is_array: false }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.target, Target::Primitive { .. })
    }

    /// The referenced entity name, `None` for primitives.
    pub fn type_name(&self) -> Option<&str> {
        match &self.target {
            Target::Named { name } => Some(name),
            Target::Primitive { .. } => None,
        }
    }
}

impl Primitive {
    /// Spelling used in the IR and in rendered documents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Null => "null",
            Self::Untyped => "untyped",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for Primitive {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            "null" => Self::Null,
            "untyped" => Self::Untyped,
            _ => Self::Other(kind),
        }
    }
}

impl Description {
    pub fn paragraphs(&self) -> &[String] {
        match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(xs) => xs,
        }
    }

    /// Paragraphs joined by a single space, for one-line contexts like bullets.
    pub fn inline(&self) -> String {
        self.paragraphs().join(" ")
    }
}

impl Enum {
    pub fn description(&self) -> Option<&Description> {
        self.docs.as_ref()?.description.as_ref()
    }

    pub fn value_description(&self, value: &str) -> Option<&Description> {
        self.docs.as_ref()?.values.get(value)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn default_major_version() -> u32 {
    1
}

trait Named {
    fn name(&self) -> &str;
}

impl Named for Type {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Enum {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Union {
    fn name(&self) -> &str {
        &self.name
    }
}

fn keyed_by_name<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Named,
{
    let items = Vec::<T>::deserialize(deserializer)?;
    Ok(items.into_iter().map(|x| (x.name().to_string(), x)).collect())
}

// ------------------------------- Tests ------------------------------------ //
