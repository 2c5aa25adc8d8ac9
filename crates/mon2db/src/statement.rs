//! Prepared-statement registry. Each statement is a SQL template plus a
//! descriptor-driven parameter list whose values live in the shared
//! scratch pool; handlers fill the slots and the session reads them
//! back out as positional parameters at execute time.

use anyhow::{anyhow, Context};
use indexmap::IndexMap;

use mon2db_core::bind::{BindSpec, BindType};
use mon2db_core::convert::{parse_f64, parse_i8, parse_i16, parse_i32, parse_u32};
use mon2db_core::event::EventInput;
use mon2db_core::scratch::{NullSlot, PoolUsage, ScratchPool, Slot, SlotAllocator};

use crate::{Result, Value};

/// Identifies a prepared statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtId {
    // Object id resolution
    GetObjId,
    GetObjIdN2Null,
    InsertObj,
    GetAllObjs,
    SetObjActive,

    // Realtime event statements
    HandleLogEntry,
    LogEntryExists,
    HandleProcess,
    UpdateProcessShutdown,
    HandleTimedEvent,
    TimedEventQueueAdd,
    TimedEventQueueRemove,
    TimedEventQueueSweep,
    HandleSystemCommand,
    HandleEventHandler,
    HandleNotification,
    HandleContactNotification,
    HandleContactNotificationMethod,
    HandleHostCheck,
    HandleServiceCheck,
    CommentAddHistory,
    CommentAddLive,
    CommentDeleteHistory,
    CommentDeleteLive,
    DowntimeAddHistory,
    DowntimeAddLive,
    DowntimeStartHistory,
    DowntimeStartLive,
    DowntimeStopHistory,
    DowntimeDeleteLive,
    HandleFlapping,
    HandleProgramStatus,
    HandleHostStatus,
    HandleServiceStatus,
    HandleContactStatus,
    HandleExternalCommand,
    HandleAcknowledgement,
    HandleStateChange,

    // Config and definition statements
    HandleConfigFile,
    SaveConfigFileVariable,
    HandleRuntimeVariable,
    HandleHost,
    SaveHostParent,
    SaveHostContactGroup,
    SaveHostContact,
    HandleHostGroup,
    SaveHostGroupMember,
    HandleService,
    SaveServiceContactGroup,
    SaveServiceContact,
    HandleServiceGroup,
    SaveServiceGroupMember,
    HandleHostDependency,
    HandleServiceDependency,
    HandleHostEscalation,
    SaveHostEscalationContactGroup,
    SaveHostEscalationContact,
    HandleServiceEscalation,
    SaveServiceEscalationContactGroup,
    SaveServiceEscalationContact,
    HandleCommand,
    HandleTimePeriod,
    SaveTimePeriodRange,
    HandleContact,
    SaveContactAddress,
    SaveContactNotificationCommand,
    HandleContactGroup,
    SaveContactGroupMember,
    SaveCustomVariable,
    SaveCustomVariableStatus,
}

#[derive(Debug, Clone, Copy)]
struct PreparedParam {
    spec: BindSpec,
    slot: Slot,
    null: Option<NullSlot>,
}

#[derive(Debug)]
struct Statement {
    sql: String,
    params: Vec<PreparedParam>,
}

/// All prepared statements plus the scratch pool their parameters bind
/// into. Statements share pool slots, so at most one statement's
/// parameters are meaningful at a time; the dispatch loop is
/// single-threaded which makes that safe.
#[derive(Debug, Default)]
pub struct Registry {
    stmts: IndexMap<StmtId, Statement>,
    pool: ScratchPool,
    usage: PoolUsage,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers a statement, assigning scratch slots for its
    /// parameters from position zero of each bank.
    pub fn prepare(&mut self, id: StmtId, sql: String, params: &[BindSpec]) -> Result<()> {
        let mut alloc = SlotAllocator::new();
        let mut prepared = Vec::with_capacity(params.len());
        for spec in params {
            let slot = alloc
                .alloc(spec.ty)
                .with_context(|| format!("preparing {:?}", id))?;
            let null = if spec.nullable {
                Some(alloc.alloc_null().with_context(|| format!("preparing {:?}", id))?)
            } else {
                None
            };
            prepared.push(PreparedParam {
                spec: *spec,
                slot,
                null,
            });
        }
        self.usage.merge_max(alloc.usage());
        self.stmts.insert(id, Statement { sql, params: prepared });
        Ok(())
    }

    fn statement(&self, id: StmtId) -> Result<&Statement> {
        self.stmts
            .get(&id)
            .ok_or_else(|| anyhow!("statement {:?} not prepared", id))
    }

    fn param(&self, id: StmtId, idx: usize) -> Result<PreparedParam> {
        let stmt = self.statement(id)?;
        stmt.params
            .get(idx)
            .copied()
            .ok_or_else(|| anyhow!("statement {:?} has no parameter {}", id, idx))
    }

    /// SQL template for a statement.
    pub fn sql(&self, id: StmtId) -> Result<&str> {
        Ok(self.statement(id)?.sql.as_str())
    }

    /// Converts and binds every parameter with an event-field source,
    /// and fills config-type columns from `config_type`. Parameters
    /// without a source are left for the handler to set.
    pub fn auto_bind(&mut self, id: StmtId, input: &EventInput, config_type: i8) -> Result<()> {
        let params = self.statement(id)?.params.clone();
        for p in &params {
            if p.spec.config_type {
                self.pool.put_int(p.slot, config_type as i64);
                continue;
            }
            let field = match p.spec.source {
                Some(field) => field,
                None => continue,
            };
            let raw = input.get(field);
            match p.spec.ty {
                BindType::I8 => self.pool.put_int(p.slot, parse_i8(raw).value as i64),
                BindType::I16 => self.pool.put_int(p.slot, parse_i16(raw).value as i64),
                BindType::I32 => self.pool.put_int(p.slot, parse_i32(raw).value as i64),
                BindType::U32 | BindType::UnixTime => {
                    self.pool.put_uint(p.slot, parse_u32(raw).value as u64)
                }
                BindType::F64 => self.pool.put_f64(p.slot, parse_f64(raw).value),
                BindType::ShortStr | BindType::LongStr => {
                    self.pool.put_str(p.slot, raw.unwrap_or(""));
                    if let Some(null) = p.null {
                        self.pool.set_null(null, raw.is_none());
                    }
                }
            }
        }
        Ok(())
    }

    pub fn set_int(&mut self, id: StmtId, idx: usize, v: i64) -> Result<()> {
        let p = self.param(id, idx)?;
        self.pool.put_int(p.slot, v);
        if let Some(null) = p.null {
            self.pool.set_null(null, false);
        }
        Ok(())
    }

    pub fn set_uint(&mut self, id: StmtId, idx: usize, v: u64) -> Result<()> {
        let p = self.param(id, idx)?;
        self.pool.put_uint(p.slot, v);
        if let Some(null) = p.null {
            self.pool.set_null(null, false);
        }
        Ok(())
    }

    pub fn set_f64(&mut self, id: StmtId, idx: usize, v: f64) -> Result<()> {
        let p = self.param(id, idx)?;
        self.pool.put_f64(p.slot, v);
        if let Some(null) = p.null {
            self.pool.set_null(null, false);
        }
        Ok(())
    }

    pub fn set_str(&mut self, id: StmtId, idx: usize, s: &str) -> Result<()> {
        let p = self.param(id, idx)?;
        self.pool.put_str(p.slot, s);
        if let Some(null) = p.null {
            self.pool.set_null(null, false);
        }
        Ok(())
    }

    /// Binds a string or NULL for a nullable column.
    pub fn set_opt_str(&mut self, id: StmtId, idx: usize, s: Option<&str>) -> Result<()> {
        let p = self.param(id, idx)?;
        self.pool.put_str(p.slot, s.unwrap_or(""));
        match p.null {
            Some(null) => self.pool.set_null(null, s.is_none()),
            None if s.is_none() => {
                return Err(anyhow!("parameter {} of {:?} is not nullable", idx, id))
            }
            None => {}
        }
        Ok(())
    }

    /// Reads the current parameter values out of the pool, honoring
    /// null flags.
    pub fn param_values(&self, id: StmtId) -> Result<Vec<Value>> {
        let stmt = self.statement(id)?;
        Ok(stmt
            .params
            .iter()
            .map(|p| match p.null {
                Some(null) if self.pool.is_null(null) => Value::Null,
                _ => self.pool.value(p.slot),
            })
            .collect())
    }

    /// High-water scratch usage across all prepared statements.
    pub fn usage(&self) -> PoolUsage {
        self.usage
    }
}

#[cfg(test)]
mod tests {
    use mon2db_core::event::Field;

    use super::*;

    const PARAMS: &[BindSpec] = &[
        BindSpec::col("object_id", BindType::U32),
        BindSpec::from_field("state", BindType::I16, Field::State),
        BindSpec::from_field("output", BindType::LongStr, Field::Output).nullable(),
    ];

    #[test]
    fn auto_bind_converts_sourced_params() {
        let mut reg = Registry::new();
        reg.prepare(StmtId::HandleHostCheck, "INSERT ...".into(), PARAMS)
            .unwrap();

        let mut input = EventInput::new();
        input.set(Field::State, "2");
        reg.auto_bind(StmtId::HandleHostCheck, &input, 0).unwrap();
        reg.set_uint(StmtId::HandleHostCheck, 0, 42).unwrap();

        assert_eq!(
            reg.param_values(StmtId::HandleHostCheck).unwrap(),
            vec![Value::U32(42), Value::I16(2), Value::Null]
        );
    }

    #[test]
    fn nullable_params_toggle() {
        let mut reg = Registry::new();
        reg.prepare(StmtId::InsertObj, "INSERT ...".into(), PARAMS)
            .unwrap();

        reg.set_opt_str(StmtId::InsertObj, 2, Some("ok")).unwrap();
        assert_eq!(
            reg.param_values(StmtId::InsertObj).unwrap()[2],
            Value::Str("ok".into())
        );

        reg.set_opt_str(StmtId::InsertObj, 2, None).unwrap();
        assert_eq!(reg.param_values(StmtId::InsertObj).unwrap()[2], Value::Null);

        // Non-nullable parameters reject explicit NULLs.
        assert!(reg.set_opt_str(StmtId::InsertObj, 1, None).is_err());
    }

    #[test]
    fn unknown_statements_error() {
        let reg = Registry::new();
        assert!(reg.sql(StmtId::HandleCommand).is_err());
        assert!(reg.param_values(StmtId::HandleCommand).is_err());
    }
}
