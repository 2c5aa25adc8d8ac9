use mon2db_core::bind::{BindSpec, BindType};
use mon2db_sql::{SqlBuilder, Table};

use crate::statement::{Registry, StmtId};
use crate::Result;

/// Parameters shared by the object id statements: lookup binds the
/// first two or three, insert binds all three with name2 NULL-able.
const LOOKUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("objecttype_id", BindType::I8),
    BindSpec::col("name1", BindType::ShortStr),
    BindSpec::col("name2", BindType::ShortStr),
];

const INSERT_PARAMS: &[BindSpec] = &[
    BindSpec::col("objecttype_id", BindType::I8),
    BindSpec::col("name1", BindType::ShortStr),
    BindSpec::col("name2", BindType::ShortStr).nullable(),
];

const ACTIVE_PARAMS: &[BindSpec] = &[
    BindSpec::col("object_id", BindType::U32),
    BindSpec::col("objecttype_id", BindType::I8),
];

pub(crate) fn prepare(reg: &mut Registry, sql: &SqlBuilder) -> Result<()> {
    reg.prepare(StmtId::GetObjId, sql.object_id_select(false), LOOKUP_PARAMS)?;
    reg.prepare(
        StmtId::GetObjIdN2Null,
        sql.object_id_select(true),
        &LOOKUP_PARAMS[..2],
    )?;
    reg.prepare(
        StmtId::InsertObj,
        sql.insert(Table::Objects, INSERT_PARAMS),
        INSERT_PARAMS,
    )?;
    reg.prepare(StmtId::GetAllObjs, sql.object_select_all(), &[])?;
    reg.prepare(StmtId::SetObjActive, sql.object_set_active(), ACTIVE_PARAMS)?;
    Ok(())
}
