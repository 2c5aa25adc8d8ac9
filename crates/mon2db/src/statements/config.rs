//! Configuration-payload statements: config files and their
//! variables, plus runtime variables.

use mon2db_core::bind::{BindSpec, BindType};
use mon2db_core::event::Field;
use mon2db_sql::{SqlBuilder, Table};

use crate::statement::{Registry, StmtId};
use crate::Result;

const CONFIGFILE_PARAMS: &[BindSpec] = &[
    BindSpec::col("configfile_type", BindType::I16),
    BindSpec::from_field("configfile_path", BindType::ShortStr, Field::ConfigFileName),
];

const CONFIGFILEVARIABLE_PARAMS: &[BindSpec] = &[
    BindSpec::col("configfile_id", BindType::U32),
    BindSpec::col("varname", BindType::ShortStr),
    BindSpec::col("varvalue", BindType::ShortStr),
];

const RUNTIMEVARIABLE_PARAMS: &[BindSpec] = &[
    BindSpec::col("varname", BindType::ShortStr),
    BindSpec::col("varvalue", BindType::ShortStr),
];

pub(crate) fn prepare(reg: &mut Registry, sql: &SqlBuilder) -> Result<()> {
    reg.prepare(
        StmtId::HandleConfigFile,
        sql.upsert(Table::ConfigFiles, CONFIGFILE_PARAMS),
        CONFIGFILE_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveConfigFileVariable,
        sql.insert(Table::ConfigFileVariables, CONFIGFILEVARIABLE_PARAMS),
        CONFIGFILEVARIABLE_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleRuntimeVariable,
        sql.upsert(Table::RuntimeVariables, RUNTIMEVARIABLE_PARAMS),
        RUNTIMEVARIABLE_PARAMS,
    )?;
    Ok(())
}
