//! Annotations attached to trees, vertices and taxa.
//!
//! Provides the [Annotation] struct, a named value taken from NeXML `<meta>`
//! elements or extended Newick comments (`[&key=value]`). Supported values
//! captured by [AnnotationValue] are `f64`, `i64`, and `String`.

use std::fmt;

// =#========================================================================#=
// ANNOTATION
// =#========================================================================#=
/// A single named annotation.
///
/// The name is the local part of the annotated property, e.g. `closeMatch`
/// for a NeXML meta with `property="skos:closeMatch"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    name: String,
    value: AnnotationValue,
}

impl Annotation {
    /// Creates a new annotation.
    pub fn new(name: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        Annotation {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the annotation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the annotation value.
    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }
}

// =#========================================================================#=
// ANNOTATION VALUE
// =#========================================================================#=
/// Enum to encapsulate a parsed annotation value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    /// For floating point values
    Float(f64),
    /// For integer values
    Int(i64),
    /// For strings
    String(String),
}

impl AnnotationValue {
    /// Interprets raw annotation text, preferring integers over floats over strings.
    ///
    /// # Example
    /// ```
    /// use phylogroup::model::AnnotationValue;
    ///
    /// assert_eq!(AnnotationValue::parse("3"), AnnotationValue::Int(3));
    /// assert_eq!(AnnotationValue::parse("0.5"), AnnotationValue::Float(0.5));
    /// assert_eq!(AnnotationValue::parse("blue"), AnnotationValue::String("blue".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        if let Ok(v) = raw.parse::<i64>() {
            AnnotationValue::Int(v)
        } else if let Ok(v) = raw.parse::<f64>() {
            AnnotationValue::Float(v)
        } else {
            AnnotationValue::String(raw.to_string())
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnnotationValue::Float(v) => write!(f, "{v}"),
            AnnotationValue::Int(v) => write!(f, "{v}"),
            AnnotationValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for AnnotationValue {
    fn from(v: f64) -> Self {
        AnnotationValue::Float(v)
    }
}

impl From<i64> for AnnotationValue {
    fn from(v: i64) -> Self {
        AnnotationValue::Int(v)
    }
}

impl From<String> for AnnotationValue {
    fn from(v: String) -> Self {
        AnnotationValue::String(v)
    }
}

impl From<&str> for AnnotationValue {
    fn from(v: &str) -> Self {
        AnnotationValue::String(v.to_string())
    }
}
