use std::fmt;
use std::hash::{Hash, Hasher};

/// Token table for loaded class, interface and annotation types
pub const TABLE_TYPE: u8 = 0x02;
/// Token table for declared methods
pub const TABLE_METHOD: u8 = 0x06;
/// Token table for array types constructed at runtime
pub const TABLE_ARRAY: u8 = 0x1B;
/// Token table for built-in types registered by the runtime itself
pub const TABLE_BUILTIN: u8 = 0xF0;

/// An identifier of an entry in the reflective type model.
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table the entry belongs to
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// Tokens are unique within a [`crate::metadata::typesystem::TypeRegistry`], but they are
/// not the identity used by the introspection caches; those compare type handles by pointer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Creates a token from a table id and a row index
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
