//! Inferred schema types
//!
//! A [`ClassDescriptor`] is created once per first-visited container node and
//! never changes afterwards. Property annotations are typed here but travel
//! as the familiar `"key: Type"` strings when serialized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::naming::capitalize;

/// Primitive JSON type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    Null,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Null => "null",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(PrimitiveType::String),
            "number" => Ok(PrimitiveType::Number),
            "boolean" => Ok(PrimitiveType::Boolean),
            "null" => Ok(PrimitiveType::Null),
            _ => Err(format!("Unknown primitive type: {}", s)),
        }
    }
}

/// Inferred type of one property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeAnnotation {
    /// `string`, `number`, ...
    Primitive(PrimitiveType),
    /// `number[]`, judged from the first element only
    PrimitiveArray(PrimitiveType),
    /// `any[]` for an empty array
    AnyArray,
    /// A nested object, named after its key
    Class(String),
    /// An array whose first element is a container
    ClassArray(String),
}

impl TypeAnnotation {
    /// Class name this annotation refers to, if any
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeAnnotation::Class(name) | TypeAnnotation::ClassArray(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TypeAnnotation::PrimitiveArray(_)
                | TypeAnnotation::AnyArray
                | TypeAnnotation::ClassArray(_)
        )
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Primitive(p) => write!(f, "{}", p),
            TypeAnnotation::PrimitiveArray(p) => write!(f, "{}[]", p),
            TypeAnnotation::AnyArray => f.write_str("any[]"),
            TypeAnnotation::Class(name) => f.write_str(name),
            TypeAnnotation::ClassArray(name) => write!(f, "{}[]", name),
        }
    }
}

impl FromStr for TypeAnnotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("Empty type annotation".to_string());
        }
        if s == "any[]" {
            return Ok(TypeAnnotation::AnyArray);
        }
        match s.strip_suffix("[]") {
            // An object stored under the key `[]`
            Some("") => Ok(TypeAnnotation::Class(s.to_string())),
            Some(inner) => Ok(match inner.parse::<PrimitiveType>() {
                Ok(p) => TypeAnnotation::PrimitiveArray(p),
                Err(_) => TypeAnnotation::ClassArray(inner.to_string()),
            }),
            None => Ok(match s.parse::<PrimitiveType>() {
                Ok(p) => TypeAnnotation::Primitive(p),
                Err(_) => TypeAnnotation::Class(s.to_string()),
            }),
        }
    }
}

/// One `key: Type` row of a class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PropertyDescriptor {
    pub key: String,
    pub annotation: TypeAnnotation,
}

impl PropertyDescriptor {
    pub fn new(key: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            key: key.into(),
            annotation,
        }
    }

    /// The annotation in its string form
    pub fn type_annotation(&self) -> String {
        self.annotation.to_string()
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.annotation)
    }
}

impl From<PropertyDescriptor> for String {
    fn from(property: PropertyDescriptor) -> Self {
        property.to_string()
    }
}

impl PropertyDescriptor {
    /// Split a row where the annotation is the class named after the key
    ///
    /// Keys and class names may both contain `": "`, so every separator is
    /// tried from the left. Returns `None` when no split names a class.
    fn parse_class_row(row: &str) -> Option<Self> {
        row.match_indices(": ").find_map(|(at, sep)| {
            let key = &row[..at];
            let annotation = &row[at + sep.len()..];
            let class_name = capitalize(key);
            if annotation == class_name {
                Some(Self::new(key, TypeAnnotation::Class(class_name)))
            } else if annotation.strip_suffix("[]") == Some(class_name.as_str()) {
                Some(Self::new(key, TypeAnnotation::ClassArray(class_name)))
            } else {
                None
            }
        })
    }
}

impl TryFrom<String> for PropertyDescriptor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(property) = Self::parse_class_row(&value) {
            return Ok(property);
        }
        // Primitive annotations never contain ": "
        let (key, annotation) = value
            .rsplit_once(": ")
            .ok_or_else(|| format!("Expected 'key: Type', got '{}'", value))?;
        Ok(Self::new(key, annotation.parse()?))
    }
}

/// An inferred class: a name plus ordered properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.key == key)
    }

    /// Property rows as display strings
    pub fn property_lines(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.to_string()).collect()
    }
}

/// Directed relationship between two classes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e-{}-{}", source, target),
            source,
            target,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Output of one inference run
///
/// `edges` is `None` in classes-only mode and is then omitted from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassSchema {
    pub classes: Vec<ClassDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
}

impl ClassSchema {
    pub fn classes_only(classes: Vec<ClassDescriptor>) -> Self {
        Self {
            classes,
            edges: None,
        }
    }

    pub fn with_edges(classes: Vec<ClassDescriptor>, edges: Vec<Edge>) -> Self {
        Self {
            classes,
            edges: Some(edges),
        }
    }

    /// Edges, or an empty slice in classes-only mode
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_deref().unwrap_or(&[])
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// First class with the given name
    pub fn get_class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name == name)
    }
}
