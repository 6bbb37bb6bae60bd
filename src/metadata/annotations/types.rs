use crate::metadata::typesystem::{ClassTypeRc, ClassTypeRef};

/// Represents a single annotation element value
#[derive(Debug, Clone)]
pub enum AnnotationValue {
    /// Boolean value
    Bool(bool),
    /// Integral value (all integral element types are widened)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enum constant, as declaring enum type and constant name
    Enum(ClassTypeRef, String),
    /// Type literal
    Type(ClassTypeRef),
    /// Array of values
    Array(Vec<AnnotationValue>),
}

/// Represents an annotation instance applied to an element
#[derive(Debug, Clone)]
pub struct Annotation {
    /// The annotation type this is an instance of
    pub annotation_type: ClassTypeRef,
    /// Named element values, in declaration order
    pub values: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    /// Create an instance of `annotation_type` without element values
    pub fn new(annotation_type: &ClassTypeRc) -> Self {
        Annotation {
            annotation_type: annotation_type.into(),
            values: Vec::new(),
        }
    }

    /// Add an element value
    #[must_use]
    pub fn with_value(mut self, name: &str, value: AnnotationValue) -> Self {
        self.values.push((name.to_string(), value));
        self
    }

    /// The annotation type, if it is still alive
    pub fn annotation_type(&self) -> Option<ClassTypeRc> {
        self.annotation_type.upgrade()
    }

    /// Returns `true` if this is an instance of exactly `annotation_type`
    pub fn is_instance_of(&self, annotation_type: &ClassTypeRc) -> bool {
        self.annotation_type.refers_to(annotation_type)
    }

    /// Look up an element value by name
    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}
