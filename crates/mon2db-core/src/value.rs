/// A typed scalar crossing the statement boundary, either as a bound
/// parameter or as a fetched result column.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Signed 8-bit integer (TINYINT columns, flags and small enums)
    I8(i8),

    /// Signed 16-bit integer (SMALLINT columns)
    I16(i16),

    /// Signed 32-bit integer (INT columns)
    I32(i32),

    /// Unsigned 32-bit integer (ids and unix timestamps)
    U32(u32),

    /// Unsigned 64-bit integer. Never bound as a parameter; carries
    /// BIGINT UNSIGNED id columns read back from the server.
    U64(u64),

    /// Double precision float
    F64(f64),

    /// String value
    Str(String),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Widens any integer variant to u64, for id/count columns. Returns
    /// `None` for nulls, floats and strings.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::I8(v) => Some(*v as u64),
            Self::I16(v) => Some(*v as u64),
            Self::I32(v) => Some(*v as u64),
            Self::U32(v) => Some(*v as u64),
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Narrows any integer variant to i8 with the cast-on-copy semantics
    /// used throughout the binding layer.
    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Self::I8(v) => Some(*v),
            Self::I16(v) => Some(*v as i8),
            Self::I32(v) => Some(*v as i8),
            Self::U32(v) => Some(*v as i8),
            Self::U64(v) => Some(*v as i8),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Value {
        Value::Str(src.to_owned())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Value {
        Value::Str(src)
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Value {
        Value::U32(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widening() {
        assert_eq!(Value::I8(-1).as_u64(), Some(u64::MAX));
        assert_eq!(Value::U32(7).as_u64(), Some(7));
        assert_eq!(Value::Null.as_u64(), None);
        assert_eq!(Value::Str("7".into()).as_u64(), None);
    }

    #[test]
    fn null_default() {
        assert!(Value::default().is_null());
    }
}
