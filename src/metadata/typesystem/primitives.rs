use strum::{Display, EnumIter};

/// Built-in primitive types of the runtime.
///
/// Primitives have neither a superclass nor interfaces, their hierarchy is the type alone.
/// They are registered by [`crate::metadata::typesystem::TypeRegistry::new`] and can serve
/// as array components like any other type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    /// `void`, only valid as a return type
    Void,
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
}

impl PrimitiveKind {
    /// Row of the artificial token reserved for this primitive
    #[must_use]
    pub fn row(&self) -> u32 {
        match self {
            PrimitiveKind::Void => 0x10,
            PrimitiveKind::Boolean => 0x11,
            PrimitiveKind::Byte => 0x12,
            PrimitiveKind::Char => 0x13,
            PrimitiveKind::Short => 0x14,
            PrimitiveKind::Int => 0x15,
            PrimitiveKind::Long => 0x16,
            PrimitiveKind::Float => 0x17,
            PrimitiveKind::Double => 0x18,
        }
    }
}
