//! Declarative parameter descriptors. Each prepared statement carries a
//! const table of [`BindSpec`]s naming its columns, their scratch slot
//! types, and where their values come from at execute time.

use crate::event::Field;

/// Scratch slot type for one bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    I8,
    I16,
    I32,
    U32,
    F64,
    /// Bounded text (truncated to the short capacity).
    ShortStr,
    /// Large text such as plugin output or log entries.
    LongStr,
    /// A `u32` epoch second rendered through `FROM_UNIXTIME(?)`.
    UnixTime,
}

impl BindType {
    /// Whether the column's placeholder is wrapped in `FROM_UNIXTIME()`.
    pub fn is_time(self) -> bool {
        matches!(self, BindType::UnixTime)
    }
}

/// One column of a prepared statement.
///
/// `source` names an event field the dispatcher converts and binds
/// automatically; columns without a source are set by the handler
/// before execute. `insert_only` columns appear in the INSERT column
/// list but are skipped by the upsert's UPDATE clause.
#[derive(Debug, Clone, Copy)]
pub struct BindSpec {
    pub column: &'static str,
    pub ty: BindType,
    pub source: Option<Field>,
    pub insert_only: bool,
    pub nullable: bool,
    /// Filled from the session's current object config type.
    pub config_type: bool,
}

impl BindSpec {
    /// A caller-set column with no automatic source.
    pub const fn col(column: &'static str, ty: BindType) -> BindSpec {
        BindSpec {
            column,
            ty,
            source: None,
            insert_only: false,
            nullable: false,
            config_type: false,
        }
    }

    /// A column converted automatically from an event field.
    pub const fn from_field(column: &'static str, ty: BindType, field: Field) -> BindSpec {
        BindSpec {
            column,
            ty,
            source: Some(field),
            insert_only: false,
            nullable: false,
            config_type: false,
        }
    }

    /// A column filled from the session's config type (original vs
    /// retained object definitions).
    pub const fn config_type(column: &'static str) -> BindSpec {
        BindSpec {
            column,
            ty: BindType::I8,
            source: None,
            insert_only: false,
            nullable: false,
            config_type: true,
        }
    }

    pub const fn insert_only(mut self) -> BindSpec {
        self.insert_only = true;
        self
    }

    pub const fn nullable(mut self) -> BindSpec {
        self.nullable = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        const SPEC: BindSpec =
            BindSpec::from_field("start_time", BindType::UnixTime, Field::StartTime).insert_only();
        assert_eq!(SPEC.column, "start_time");
        assert!(SPEC.insert_only);
        assert!(SPEC.ty.is_time());
        assert_eq!(SPEC.source, Some(Field::StartTime));
        assert!(!SPEC.nullable);
    }
}
