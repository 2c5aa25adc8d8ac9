//! Statement definitions: one const descriptor table per statement
//! naming its columns, slot types, and automatic event-field sources,
//! plus the preparation calls that register the printed templates.

pub(crate) mod config;
pub(crate) mod definitions;
pub(crate) mod events;
pub(crate) mod objects;
pub(crate) mod realtime;

use mon2db_sql::SqlBuilder;

use crate::statement::Registry;
use crate::Result;

/// Prepares every statement. Called once per session, after the
/// instance id is known.
pub(crate) fn prepare_all(reg: &mut Registry, sql: &SqlBuilder) -> Result<()> {
    objects::prepare(reg, sql)?;
    events::prepare(reg, sql)?;
    realtime::prepare(reg, sql)?;
    config::prepare(reg, sql)?;
    definitions::prepare(reg, sql)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use mon2db_core::scratch;

    use super::*;

    #[test]
    fn all_statements_fit_the_scratch_pool() {
        let mut reg = Registry::new();
        let sql = SqlBuilder::new("nagios_", 1);
        prepare_all(&mut reg, &sql).unwrap();

        let usage = reg.usage();
        assert!(usage.i8s <= scratch::I8_SLOTS);
        assert!(usage.i16s <= scratch::I16_SLOTS);
        assert!(usage.i32s <= scratch::I32_SLOTS);
        assert!(usage.u32s <= scratch::U32_SLOTS);
        assert!(usage.f64s <= scratch::F64_SLOTS);
        assert!(usage.short_strs <= scratch::SHORT_STR_SLOTS);
        assert!(usage.long_strs <= scratch::LONG_STR_SLOTS);
        assert!(usage.nulls <= scratch::NULL_SLOTS);
    }
}
