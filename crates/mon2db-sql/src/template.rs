use std::fmt::Write;

use mon2db_core::bind::BindSpec;

use crate::table::Table;

/// Prints statement templates for one session. The table prefix and
/// instance id are fixed for the life of a connection, so both are
/// rendered into the SQL text rather than bound.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    prefix: String,
    instance_id: u64,
}

impl SqlBuilder {
    pub fn new(prefix: impl Into<String>, instance_id: u64) -> SqlBuilder {
        SqlBuilder {
            prefix: prefix.into(),
            instance_id,
        }
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    fn table(&self, table: Table) -> String {
        format!("{}{}", self.prefix, table.base_name())
    }

    /// `INSERT INTO t (instance_id,c1,...) VALUES (N,?,...)`, with
    /// timestamp columns rendered as `FROM_UNIXTIME(?)`.
    pub fn insert(&self, table: Table, params: &[BindSpec]) -> String {
        self.print_insert(table, params, false)
    }

    /// [`SqlBuilder::insert`] plus an `ON DUPLICATE KEY UPDATE` clause
    /// covering every column except insert-only ones.
    pub fn upsert(&self, table: Table, params: &[BindSpec]) -> String {
        self.print_insert(table, params, true)
    }

    fn print_insert(&self, table: Table, params: &[BindSpec], up_on_dup: bool) -> String {
        let mut sql = format!("INSERT INTO {} (instance_id", self.table(table));
        for p in params {
            let _ = write!(sql, ",{}", p.column);
        }
        let _ = write!(sql, ") VALUES ({}", self.instance_id);
        for p in params {
            sql.push_str(if p.ty.is_time() { ",FROM_UNIXTIME(?)" } else { ",?" });
        }
        sql.push(')');

        if up_on_dup {
            sql.push_str(" ON DUPLICATE KEY UPDATE instance_id=VALUES(instance_id)");
            for p in params {
                if p.insert_only {
                    continue;
                }
                let _ = write!(sql, ",{}=VALUES({})", p.column, p.column);
            }
        }
        sql
    }

    /// Object id lookup by `(objecttype_id, name1, name2)`. The BINARY
    /// operator forces case-sensitive name comparison; a NULL second
    /// name needs its own template since `= NULL` never matches.
    pub fn object_id_select(&self, name2_null: bool) -> String {
        let cond = if name2_null {
            "objecttype_id=? AND BINARY name1=? AND name2 IS NULL"
        } else {
            "objecttype_id=? AND BINARY name1=? AND BINARY name2=?"
        };
        format!(
            "SELECT object_id FROM {} WHERE instance_id={} AND {}",
            self.table(Table::Objects),
            self.instance_id,
            cond
        )
    }

    /// Loads every object row for the instance, for cache preload.
    pub fn object_select_all(&self) -> String {
        format!(
            "SELECT object_id,objecttype_id,name1,name2 FROM {} WHERE instance_id={}",
            self.table(Table::Objects),
            self.instance_id
        )
    }

    /// Marks one object active for the instance.
    pub fn object_set_active(&self) -> String {
        format!(
            "UPDATE {} SET is_active=1 WHERE instance_id={} AND object_id=? AND objecttype_id=?",
            self.table(Table::Objects),
            self.instance_id
        )
    }

    /// Marks every object inactive, ahead of a config dump re-activating
    /// the live ones.
    pub fn object_clear_active(&self) -> String {
        format!(
            "UPDATE {} SET is_active=0 WHERE instance_id={}",
            self.table(Table::Objects),
            self.instance_id
        )
    }

    /// `SELECT` scoped to the instance, with an extra condition
    /// containing `?` placeholders.
    pub fn select_where(&self, table: Table, columns: &str, and_where: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE instance_id={} AND {}",
            columns,
            self.table(table),
            self.instance_id,
            and_where
        )
    }

    /// `DELETE` scoped to the instance, with an optional extra
    /// condition containing `?` placeholders.
    pub fn delete(&self, table: Table, and_where: &str) -> String {
        let mut sql = format!(
            "DELETE FROM {} WHERE instance_id={}",
            self.table(table),
            self.instance_id
        );
        if !and_where.is_empty() {
            let _ = write!(sql, " AND {}", and_where);
        }
        sql
    }

    /// `UPDATE` scoped to the instance. `set_clause` and `and_where`
    /// may contain `?` placeholders; `and_where` may be empty.
    pub fn update(&self, table: Table, set_clause: &str, and_where: &str) -> String {
        let mut sql = format!(
            "UPDATE {} SET {} WHERE instance_id={}",
            self.table(table),
            set_clause,
            self.instance_id
        );
        if !and_where.is_empty() {
            let _ = write!(sql, " AND {}", and_where);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use mon2db_core::bind::{BindSpec, BindType};
    use mon2db_core::event::Field;
    use pretty_assertions::assert_eq;

    use super::*;

    const PARAMS: &[BindSpec] = &[
        BindSpec::from_field("start_time", BindType::UnixTime, Field::StartTime).insert_only(),
        BindSpec::from_field("end_time", BindType::UnixTime, Field::EndTime),
        BindSpec::from_field("output", BindType::LongStr, Field::Output),
    ];

    fn builder() -> SqlBuilder {
        SqlBuilder::new("nagios_", 7)
    }

    #[test]
    fn insert_template() {
        assert_eq!(
            builder().insert(Table::HostChecks, PARAMS),
            "INSERT INTO nagios_hostchecks (instance_id,start_time,end_time,output) \
             VALUES (7,FROM_UNIXTIME(?),FROM_UNIXTIME(?),?)"
        );
    }

    #[test]
    fn upsert_skips_insert_only_columns() {
        assert_eq!(
            builder().upsert(Table::HostChecks, PARAMS),
            "INSERT INTO nagios_hostchecks (instance_id,start_time,end_time,output) \
             VALUES (7,FROM_UNIXTIME(?),FROM_UNIXTIME(?),?) \
             ON DUPLICATE KEY UPDATE instance_id=VALUES(instance_id),\
             end_time=VALUES(end_time),output=VALUES(output)"
        );
    }

    #[test]
    fn object_templates() {
        let b = builder();
        assert_eq!(
            b.object_id_select(false),
            "SELECT object_id FROM nagios_objects WHERE instance_id=7 \
             AND objecttype_id=? AND BINARY name1=? AND BINARY name2=?"
        );
        assert_eq!(
            b.object_id_select(true),
            "SELECT object_id FROM nagios_objects WHERE instance_id=7 \
             AND objecttype_id=? AND BINARY name1=? AND name2 IS NULL"
        );
        assert_eq!(
            b.object_select_all(),
            "SELECT object_id,objecttype_id,name1,name2 FROM nagios_objects WHERE instance_id=7"
        );
        assert_eq!(
            b.object_set_active(),
            "UPDATE nagios_objects SET is_active=1 WHERE instance_id=7 \
             AND object_id=? AND objecttype_id=?"
        );
    }

    #[test]
    fn delete_and_update_scoping() {
        let b = builder();
        assert_eq!(
            b.delete(Table::TimedEventQueue, "event_type=? AND scheduled_time=FROM_UNIXTIME(?)"),
            "DELETE FROM nagios_timedeventqueue WHERE instance_id=7 \
             AND event_type=? AND scheduled_time=FROM_UNIXTIME(?)"
        );
        assert_eq!(
            b.update(Table::ProgramStatus, "program_end_time=FROM_UNIXTIME(?),is_currently_running=0", ""),
            "UPDATE nagios_programstatus SET \
             program_end_time=FROM_UNIXTIME(?),is_currently_running=0 WHERE instance_id=7"
        );
    }
}
