//! Per-connection persistence state: the prepared statement registry,
//! the object identity cache, and the dispatch entry point.

use anyhow::Context;

use mon2db_core::object::ObjectKind;
use mon2db_core::value::Value;
use mon2db_sql::SqlBuilder;

use crate::executor::{ExecOutcome, Executor, Row};
use crate::statement::{Registry, StmtId};
use crate::statements;
use crate::{ObjectCache, Result};

/// One ingest connection's view of the database: prepared statements,
/// cached object identities, and the running state the handlers carry
/// between events (config dump type, freshness high-water mark, and
/// insert-id chaining for notification sub-rows).
pub struct Session<E> {
    pub(crate) executor: E,
    pub(crate) registry: Registry,
    pub(crate) cache: ObjectCache,
    pub(crate) sql: SqlBuilder,
    /// 1 while a retained-state config dump is in progress, else 0.
    pub(crate) current_config_type: i8,
    /// Newest realtime timestamp seen; older status events are skipped.
    pub(crate) latest_realtime_time: u32,
    pub(crate) last_notification_id: u64,
    pub(crate) last_contact_notification_id: u64,
}

impl<E: Executor> Session<E> {
    /// Builds the session and generates every statement template for
    /// the given table prefix and instance.
    pub fn new(executor: E, table_prefix: impl Into<String>, instance_id: u64) -> Result<Session<E>> {
        let sql = SqlBuilder::new(table_prefix, instance_id);
        let mut registry = Registry::new();
        statements::prepare_all(&mut registry, &sql)?;

        Ok(Session {
            executor,
            registry,
            cache: ObjectCache::new(),
            sql,
            current_config_type: 0,
            latest_realtime_time: 0,
            last_notification_id: 0,
            last_contact_notification_id: 0,
        })
    }

    /// Readies the connection for ingest: loads the object cache and
    /// drops queued timed events whose scheduled time has passed.
    pub async fn start(&mut self, now: u32) -> Result<()> {
        self.preload_cache().await?;
        self.sweep_timed_event_queue(now).await
    }

    /// Removes queue entries scheduled before `cutoff`. Runs at startup
    /// and after each executed timed event, so crashes between events
    /// cannot leave the queue growing stale rows.
    pub async fn sweep_timed_event_queue(&mut self, cutoff: u32) -> Result<()> {
        self.registry.set_uint(StmtId::TimedEventQueueSweep, 0, cutoff as u64)?;
        self.execute(StmtId::TimedEventQueueSweep).await?;
        Ok(())
    }

    /// Seeds the freshness high-water mark, normally from the stored
    /// per-instance checkin time.
    pub fn set_latest_realtime_time(&mut self, t: u32) {
        self.latest_realtime_time = t;
    }

    pub fn cache(&self) -> &ObjectCache {
        &self.cache
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Rebuilds the object identity cache from the instance's object
    /// rows. Rows with an empty first name or an unknown type code are
    /// skipped; a NULL second name caches as empty.
    pub async fn preload_cache(&mut self) -> Result<()> {
        let rows = self.query(StmtId::GetAllObjs).await?;
        let mut cache = ObjectCache::for_capacity(rows.len());

        for row in &rows {
            let (id, kind, name1, name2) = match parse_object_row(row) {
                Some(parts) => parts,
                None => continue,
            };
            cache.insert(kind, name1, name2, id);
        }

        tracing::debug!(
            objects = cache.len(),
            collisions = cache.collisions(),
            "object cache loaded"
        );
        self.cache = cache;
        Ok(())
    }

    /// Marks every object row inactive ahead of a config dump
    /// re-activating the live ones. Unprepared: runs once per
    /// connection.
    pub async fn mark_all_objects_inactive(&mut self) -> Result<()> {
        let sql = self.sql.object_clear_active();
        self.executor.execute(&sql, &[]).await?;
        Ok(())
    }

    /// Resolves an object name to its id, inserting a new object row on
    /// first sight. An empty first name resolves to id zero without
    /// touching storage.
    pub async fn resolve_or_create(
        &mut self,
        kind: ObjectKind,
        name1: Option<&str>,
        name2: Option<&str>,
    ) -> Result<u64> {
        let name1 = match name1 {
            Some(n) if !n.is_empty() => n.to_owned(),
            _ => return Ok(0),
        };
        // The cache stores empty, the DB stores NULL.
        let name2 = name2.unwrap_or("").to_owned();

        if let Some(id) = self.cache.lookup(kind, &name1, &name2) {
            return Ok(id);
        }

        if let Some(id) = self.select_object_id(kind, &name1, &name2).await? {
            self.cache.insert(kind, &name1, &name2, id);
            return Ok(id);
        }

        self.registry.set_int(StmtId::InsertObj, 0, kind.code() as i64)?;
        self.registry.set_str(StmtId::InsertObj, 1, &name1)?;
        let name2_db = if name2.is_empty() { None } else { Some(name2.as_str()) };
        self.registry.set_opt_str(StmtId::InsertObj, 2, name2_db)?;
        let outcome = self.execute(StmtId::InsertObj).await?;

        let id = outcome.last_insert_id;
        self.cache.insert(kind, &name1, &name2, id);
        Ok(id)
    }

    async fn select_object_id(
        &mut self,
        kind: ObjectKind,
        name1: &str,
        name2: &str,
    ) -> Result<Option<u64>> {
        let id = if name2.is_empty() {
            StmtId::GetObjIdN2Null
        } else {
            StmtId::GetObjId
        };
        self.registry.set_int(id, 0, kind.code() as i64)?;
        self.registry.set_str(id, 1, name1)?;
        if !name2.is_empty() {
            self.registry.set_str(id, 2, name2)?;
        }

        let rows = self.query(id).await?;
        Ok(rows.first().and_then(|row| row.first()).and_then(Value::as_u64))
    }

    /// Flags one object active for the instance.
    pub async fn set_object_active(&mut self, kind: ObjectKind, id: u64) -> Result<()> {
        self.registry.set_uint(StmtId::SetObjActive, 0, id)?;
        self.registry.set_int(StmtId::SetObjActive, 1, kind.code() as i64)?;
        self.execute(StmtId::SetObjActive).await?;
        Ok(())
    }

    pub(crate) async fn execute(&mut self, id: StmtId) -> Result<ExecOutcome> {
        let params = self.registry.param_values(id)?;
        let sql = self.registry.sql(id)?;
        self.executor
            .execute(sql, &params)
            .await
            .with_context(|| format!("statement {id:?} failed"))
    }

    pub(crate) async fn query(&mut self, id: StmtId) -> Result<Vec<Row>> {
        let params = self.registry.param_values(id)?;
        let sql = self.registry.sql(id)?;
        self.executor
            .query(sql, &params)
            .await
            .with_context(|| format!("statement {id:?} failed"))
    }
}

fn parse_object_row(row: &Row) -> Option<(u64, ObjectKind, &str, &str)> {
    let id = row.first()?.as_u64()?;
    let kind = ObjectKind::from_code(row.get(1)?.as_i8()?)?;
    let name1 = row.get(2)?.as_str().filter(|n| !n.is_empty())?;
    let name2 = match row.get(3) {
        Some(Value::Null) | None => "",
        Some(v) => v.as_str()?,
    };
    Some((id, kind, name1, name2))
}
