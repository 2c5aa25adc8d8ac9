//! Event handlers. Each dispatchable [`EventKind`] maps to one handler
//! that resolves object ids, fills the caller-set parameter slots,
//! auto-binds the sourced columns, and executes the prepared
//! statement(s) for that event.

use anyhow::bail;

use mon2db_core::convert::{self, StandardData, Timeval};
use mon2db_core::event::{subtype, EventInput, EventKind, Field, MbufKind, CONFIGDUMP_RETAINED};
use mon2db_core::object::ObjectKind;
use mon2db_sql::Table;

use crate::executor::Executor;
use crate::session::Session;
use crate::statement::StmtId;
use crate::Result;

/// Attribute code marking a downtime stop as a cancellation rather
/// than a scheduled end.
const DOWNTIME_STOP_CANCELLED: i32 = 2;

impl<E: Executor> Session<E> {
    /// Persists one decoded event. Kinds with no relational mapping
    /// are accepted and dropped.
    pub async fn dispatch(&mut self, kind: EventKind, input: &EventInput) -> Result<()> {
        match kind {
            EventKind::LogEntry => self.handle_log_entry(input).await,
            EventKind::LogData => self.handle_log_data(input).await,
            EventKind::ProcessData => self.handle_process(input).await,
            EventKind::TimedEventData => self.handle_timed_event(input).await,
            EventKind::SystemCommandData => self.handle_system_command(input).await,
            EventKind::EventHandlerData => self.handle_event_handler(input).await,
            EventKind::NotificationData => self.handle_notification(input).await,
            EventKind::ContactNotificationData => self.handle_contact_notification(input).await,
            EventKind::ContactNotificationMethodData => {
                self.handle_contact_notification_method(input).await
            }
            EventKind::ServiceCheckData => self.handle_check(input, false).await,
            EventKind::HostCheckData => self.handle_check(input, true).await,
            EventKind::CommentData => self.handle_comment(input).await,
            EventKind::DowntimeData => self.handle_downtime(input).await,
            EventKind::FlappingData => self.handle_flapping(input).await,
            EventKind::ProgramStatusData => self.handle_program_status(input).await,
            EventKind::HostStatusData => self.handle_host_status(input).await,
            EventKind::ServiceStatusData => self.handle_service_status(input).await,
            EventKind::ContactStatusData => self.handle_contact_status(input).await,
            EventKind::ExternalCommandData => self.handle_external_command(input).await,
            EventKind::AcknowledgementData => self.handle_acknowledgement(input).await,
            EventKind::StateChangeData => self.handle_state_change(input).await,
            EventKind::MainConfigFileVariables => {
                self.handle_config_file_variables(input, 0).await
            }
            EventKind::ResourceConfigFileVariables => {
                self.handle_config_file_variables(input, 1).await
            }
            EventKind::RuntimeVariables => self.handle_runtime_variables(input).await,
            EventKind::ConfigDumpStart => {
                self.handle_config_dump_start(input);
                Ok(())
            }
            EventKind::HostDefinition => self.save_host_or_service_definition(input, false).await,
            EventKind::ServiceDefinition => {
                self.save_host_or_service_definition(input, true).await
            }
            EventKind::HostGroupDefinition => {
                self.save_group_definition(
                    input,
                    StmtId::HandleHostGroup,
                    ObjectKind::HostGroup,
                    Field::HostGroupName,
                    StmtId::SaveHostGroupMember,
                    ObjectKind::Host,
                    MbufKind::HostGroupMember,
                )
                .await
            }
            EventKind::ServiceGroupDefinition => {
                self.save_group_definition(
                    input,
                    StmtId::HandleServiceGroup,
                    ObjectKind::ServiceGroup,
                    Field::ServiceGroupName,
                    StmtId::SaveServiceGroupMember,
                    ObjectKind::Service,
                    MbufKind::ServiceGroupMember,
                )
                .await
            }
            EventKind::HostDependencyDefinition => {
                self.save_dependency_definition(
                    input,
                    StmtId::HandleHostDependency,
                    ObjectKind::Host,
                    None,
                    None,
                )
                .await
            }
            EventKind::ServiceDependencyDefinition => {
                self.save_dependency_definition(
                    input,
                    StmtId::HandleServiceDependency,
                    ObjectKind::Service,
                    input.get(Field::ServiceDescription),
                    input.get(Field::DependentServiceDescription),
                )
                .await
            }
            EventKind::HostEscalationDefinition => {
                self.save_escalation_definition(
                    input,
                    StmtId::HandleHostEscalation,
                    ObjectKind::Host,
                    None,
                    StmtId::SaveHostEscalationContactGroup,
                    StmtId::SaveHostEscalationContact,
                )
                .await
            }
            EventKind::ServiceEscalationDefinition => {
                self.save_escalation_definition(
                    input,
                    StmtId::HandleServiceEscalation,
                    ObjectKind::Service,
                    input.get(Field::ServiceDescription),
                    StmtId::SaveServiceEscalationContactGroup,
                    StmtId::SaveServiceEscalationContact,
                )
                .await
            }
            EventKind::CommandDefinition => self.handle_command_definition(input).await,
            EventKind::TimePeriodDefinition => self.handle_timeperiod_definition(input).await,
            EventKind::ContactDefinition => self.handle_contact_definition(input).await,
            EventKind::ContactGroupDefinition => self.handle_contactgroup_definition(input).await,
            EventKind::AdaptiveProgramData
            | EventKind::AdaptiveHostData
            | EventKind::AdaptiveServiceData
            | EventKind::AdaptiveContactData
            | EventKind::AggregatedStatusData
            | EventKind::RetentionData
            | EventKind::ConfigVariables
            | EventKind::ConfigDumpEnd => Ok(()),
        }
    }

    /// Realtime events older than the newest timestamp already stored
    /// are replays and must not clobber current state.
    fn is_stale(&self, std: &StandardData) -> bool {
        std.tstamp.sec < self.latest_realtime_time
    }

    fn note_realtime(&mut self, t: u32) {
        if t > self.latest_realtime_time {
            self.latest_realtime_time = t;
        }
    }

    /// Resolves the event's subject: a service when a service name is
    /// present, the host otherwise.
    async fn resolve_subject(&mut self, input: &EventInput) -> Result<u64> {
        let name1 = input.get(Field::Host);
        match input.get(Field::Service) {
            Some(svc) if !svc.is_empty() => {
                self.resolve_or_create(ObjectKind::Service, name1, Some(svc)).await
            }
            _ => self.resolve_or_create(ObjectKind::Host, name1, None).await,
        }
    }

    fn set_window(&mut self, id: StmtId, base: usize, start: Timeval, end: Timeval) -> Result<()> {
        self.registry.set_uint(id, base, start.sec as u64)?;
        self.registry.set_int(id, base + 1, start.usec as i64)?;
        self.registry.set_uint(id, base + 2, end.sec as u64)?;
        self.registry.set_int(id, base + 3, end.usec as i64)?;
        Ok(())
    }

    /// A historical log entry replayed from the daemon's log file.
    /// Duplicates are detected by time and text and skipped.
    async fn handle_log_entry(&mut self, input: &EventInput) -> Result<()> {
        let etime = convert::parse_u32(input.get(Field::LogEntryTime)).value;
        let data = input.get(Field::LogEntry).unwrap_or("");

        self.registry.set_uint(StmtId::LogEntryExists, 0, etime as u64)?;
        self.registry.set_str(StmtId::LogEntryExists, 1, data)?;
        if !self.query(StmtId::LogEntryExists).await?.is_empty() {
            return Ok(());
        }

        let id = StmtId::HandleLogEntry;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 1, etime as u64)?;
        self.registry.set_int(id, 2, 0)?;
        self.registry.set_int(id, 5, 0)?;
        self.registry.set_int(id, 6, 0)?;
        self.execute(id).await?;
        Ok(())
    }

    /// A live log event from the running daemon.
    async fn handle_log_data(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        let id = StmtId::HandleLogEntry;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 1, std.tstamp.sec as u64)?;
        self.registry.set_int(id, 2, std.tstamp.usec as i64)?;
        self.registry.set_int(id, 5, 1)?;
        self.registry.set_int(id, 6, 1)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_process(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        let id = StmtId::HandleProcess;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_int(id, 0, std.kind_code as i64)?;
        self.registry.set_uint(id, 1, std.tstamp.sec as u64)?;
        self.registry.set_int(id, 2, std.tstamp.usec as i64)?;
        self.execute(id).await?;

        match std.kind_code {
            subtype::PROCESS_PRELAUNCH => {
                // Config definitions replay next; anything not
                // re-dumped stays inactive.
                self.mark_all_objects_inactive().await?;
                self.clear_realtime_tables().await
            }
            subtype::PROCESS_SHUTDOWN | subtype::PROCESS_RESTART => {
                let id = StmtId::UpdateProcessShutdown;
                self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
                self.execute(id).await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Realtime tables restart empty; the daemon repopulates them
    /// after launch.
    async fn clear_realtime_tables(&mut self) -> Result<()> {
        const TABLES: &[Table] = &[
            Table::ProgramStatus,
            Table::HostStatus,
            Table::ServiceStatus,
            Table::ContactStatus,
            Table::TimedEventQueue,
            Table::Comments,
            Table::ScheduledDowntime,
            Table::RuntimeVariables,
            Table::CustomVariableStatus,
        ];
        for &table in TABLES {
            let sql = self.sql.delete(table, "");
            self.executor.execute(&sql, &[]).await?;
        }
        Ok(())
    }

    async fn handle_timed_event(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        let event_type = convert::parse_i32(input.get(Field::EventType)).value;

        let object_id = match event_type {
            subtype::EVENT_SERVICE_CHECK => {
                self.resolve_or_create(
                    ObjectKind::Service,
                    input.get(Field::Host),
                    input.get(Field::Service),
                )
                .await?
            }
            subtype::EVENT_HOST_CHECK => {
                self.resolve_or_create(ObjectKind::Host, input.get(Field::Host), None).await?
            }
            _ => 0,
        };

        match std.kind_code {
            subtype::TIMEDEVENT_ADD => {
                for id in [StmtId::HandleTimedEvent, StmtId::TimedEventQueueAdd] {
                    self.registry.auto_bind(id, input, self.current_config_type)?;
                    self.registry.set_uint(id, 1, std.tstamp.sec as u64)?;
                    self.registry.set_int(id, 2, std.tstamp.usec as i64)?;
                    self.registry.set_uint(id, 5, object_id)?;
                    self.execute(id).await?;
                }
            }
            subtype::TIMEDEVENT_REMOVE | subtype::TIMEDEVENT_EXECUTE => {
                let run_time = convert::parse_u32(input.get(Field::RunTime)).value;
                let id = StmtId::TimedEventQueueRemove;
                self.registry.set_int(id, 0, event_type as i64)?;
                self.registry.set_uint(id, 1, run_time as u64)?;
                self.registry.set_uint(id, 2, object_id)?;
                self.execute(id).await?;

                if std.kind_code == subtype::TIMEDEVENT_EXECUTE {
                    self.sweep_timed_event_queue(run_time).await?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_system_command(&mut self, input: &EventInput) -> Result<()> {
        let start = convert::parse_timeval(input.get(Field::StartTime)).value;
        let end = convert::parse_timeval(input.get(Field::EndTime)).value;

        let id = StmtId::HandleSystemCommand;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.set_window(id, 0, start, end)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_event_handler(&mut self, input: &EventInput) -> Result<()> {
        let start = convert::parse_timeval(input.get(Field::StartTime)).value;
        let end = convert::parse_timeval(input.get(Field::EndTime)).value;
        let object_id = self.resolve_subject(input).await?;
        let command_id = self
            .resolve_or_create(ObjectKind::Command, input.get(Field::CommandName), None)
            .await?;

        let id = StmtId::HandleEventHandler;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 1, object_id)?;
        self.set_window(id, 4, start, end)?;
        self.registry.set_uint(id, 8, command_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_notification(&mut self, input: &EventInput) -> Result<()> {
        let start = convert::parse_timeval(input.get(Field::StartTime)).value;
        let end = convert::parse_timeval(input.get(Field::EndTime)).value;
        let object_id = self.resolve_subject(input).await?;

        let id = StmtId::HandleNotification;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 2, object_id)?;
        self.set_window(id, 3, start, end)?;
        let outcome = self.execute(id).await?;
        // Contact notifications arriving next chain to this row.
        self.last_notification_id = outcome.last_insert_id;
        Ok(())
    }

    async fn handle_contact_notification(&mut self, input: &EventInput) -> Result<()> {
        let start = convert::parse_timeval(input.get(Field::StartTime)).value;
        let end = convert::parse_timeval(input.get(Field::EndTime)).value;
        let contact_id = self
            .resolve_or_create(ObjectKind::Contact, input.get(Field::ContactName), None)
            .await?;

        let id = StmtId::HandleContactNotification;
        self.registry.set_uint(id, 0, self.last_notification_id)?;
        self.registry.set_uint(id, 1, contact_id)?;
        self.set_window(id, 2, start, end)?;
        let outcome = self.execute(id).await?;
        self.last_contact_notification_id = outcome.last_insert_id;
        Ok(())
    }

    async fn handle_contact_notification_method(&mut self, input: &EventInput) -> Result<()> {
        let start = convert::parse_timeval(input.get(Field::StartTime)).value;
        let end = convert::parse_timeval(input.get(Field::EndTime)).value;
        let command_id = self
            .resolve_or_create(ObjectKind::Command, input.get(Field::CommandName), None)
            .await?;

        let id = StmtId::HandleContactNotificationMethod;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, self.last_contact_notification_id)?;
        self.set_window(id, 1, start, end)?;
        self.registry.set_uint(id, 5, command_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_check(&mut self, input: &EventInput, is_host: bool) -> Result<()> {
        let std = convert::parse_standard(input);

        // Prechecks carry no results; service checks are only stored
        // when initiated or processed.
        if matches!(
            std.kind_code,
            subtype::SERVICECHECK_ASYNC_PRECHECK
                | subtype::HOSTCHECK_ASYNC_PRECHECK
                | subtype::HOSTCHECK_SYNC_PRECHECK
        ) {
            return Ok(());
        }
        if !is_host
            && std.kind_code != subtype::SERVICECHECK_INITIATE
            && std.kind_code != subtype::SERVICECHECK_PROCESSED
        {
            return Ok(());
        }

        let object_id = if is_host {
            self.resolve_or_create(ObjectKind::Host, input.get(Field::Host), None).await?
        } else {
            self.resolve_or_create(
                ObjectKind::Service,
                input.get(Field::Host),
                input.get(Field::Service),
            )
            .await?
        };
        let mut command_id = 0;
        if let Some(cname) = input.get(Field::CommandName).filter(|c| !c.is_empty()) {
            command_id = self.resolve_or_create(ObjectKind::Command, Some(cname), None).await?;
        }

        let start = convert::parse_timeval(input.get(Field::StartTime)).value;
        let end = convert::parse_timeval(input.get(Field::EndTime)).value;

        let id = if is_host {
            StmtId::HandleHostCheck
        } else {
            StmtId::HandleServiceCheck
        };
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.registry.set_uint(id, 1, command_id)?;
        self.set_window(id, 2, start, end)?;
        if is_host {
            let raw = matches!(
                std.kind_code,
                subtype::HOSTCHECK_RAW_START | subtype::HOSTCHECK_RAW_END
            );
            self.registry.set_int(id, 6, raw as i64)?;
        }
        self.execute(id).await?;
        Ok(())
    }

    /// Comment adds and loads always write history; the live table is
    /// only touched when the event is fresh. Deletes tombstone history
    /// and remove the live row.
    async fn handle_comment(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);

        match std.kind_code {
            subtype::COMMENT_ADD | subtype::COMMENT_LOAD => {
                let object_id = self.resolve_subject(input).await?;
                // History keeps everything; the live table only
                // reflects current state, so stale replays skip it.
                self.save_comment_row(StmtId::CommentAddHistory, input, object_id, std.tstamp)
                    .await?;
                if !self.is_stale(&std) {
                    self.save_comment_row(StmtId::CommentAddLive, input, object_id, std.tstamp)
                        .await?;
                }
            }
            subtype::COMMENT_DELETE => {
                let ctime = convert::parse_u32(input.get(Field::CommentTime)).value;
                let cid = convert::parse_u32(input.get(Field::CommentId)).value;

                let id = StmtId::CommentDeleteHistory;
                self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
                self.registry.set_int(id, 1, std.tstamp.usec as i64)?;
                self.registry.set_uint(id, 2, ctime as u64)?;
                self.registry.set_uint(id, 3, cid as u64)?;
                self.execute(id).await?;

                let id = StmtId::CommentDeleteLive;
                self.registry.set_uint(id, 0, ctime as u64)?;
                self.registry.set_uint(id, 1, cid as u64)?;
                self.execute(id).await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn save_comment_row(
        &mut self,
        id: StmtId,
        input: &EventInput,
        object_id: u64,
        tstamp: Timeval,
    ) -> Result<()> {
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 2, object_id)?;
        self.registry.set_uint(id, 11, tstamp.sec as u64)?;
        self.registry.set_int(id, 12, tstamp.usec as i64)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_downtime(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        let object_id = self.resolve_subject(input).await?;
        let dtype = convert::parse_i32(input.get(Field::DowntimeType)).value;
        let entry = convert::parse_u32(input.get(Field::EntryTime)).value;
        let sched_start = convert::parse_u32(input.get(Field::StartTime)).value;
        let sched_end = convert::parse_u32(input.get(Field::EndTime)).value;

        match std.kind_code {
            subtype::DOWNTIME_ADD | subtype::DOWNTIME_LOAD => {
                // Stale replays only land in history, never the live
                // scheduled-downtime table.
                let mut targets = &[StmtId::DowntimeAddHistory, StmtId::DowntimeAddLive][..];
                if self.is_stale(&std) {
                    targets = &targets[..1];
                }
                for &id in targets {
                    self.registry.auto_bind(id, input, self.current_config_type)?;
                    self.registry.set_uint(id, 1, object_id)?;
                    self.execute(id).await?;
                }
            }
            subtype::DOWNTIME_START => {
                let mut targets = &[StmtId::DowntimeStartHistory, StmtId::DowntimeStartLive][..];
                if self.is_stale(&std) {
                    targets = &targets[..1];
                }
                for &id in targets {
                    self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
                    self.registry.set_int(id, 1, std.tstamp.usec as i64)?;
                    self.set_downtime_key(id, 2, object_id, dtype, entry, sched_start, sched_end)?;
                    self.execute(id).await?;
                }
            }
            subtype::DOWNTIME_STOP => {
                let cancelled = std.attr == DOWNTIME_STOP_CANCELLED;
                let id = StmtId::DowntimeStopHistory;
                self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
                self.registry.set_int(id, 1, std.tstamp.usec as i64)?;
                self.registry.set_int(id, 2, cancelled as i64)?;
                self.set_downtime_key(id, 3, object_id, dtype, entry, sched_start, sched_end)?;
                self.execute(id).await?;

                let id = StmtId::DowntimeDeleteLive;
                self.set_downtime_key(id, 0, object_id, dtype, entry, sched_start, sched_end)?;
                self.execute(id).await?;
            }
            subtype::DOWNTIME_DELETE => {
                let id = StmtId::DowntimeDeleteLive;
                self.set_downtime_key(id, 0, object_id, dtype, entry, sched_start, sched_end)?;
                self.execute(id).await?;
            }
            _ => {}
        }
        Ok(())
    }

    fn set_downtime_key(
        &mut self,
        id: StmtId,
        base: usize,
        object_id: u64,
        dtype: i32,
        entry: u32,
        sched_start: u32,
        sched_end: u32,
    ) -> Result<()> {
        self.registry.set_uint(id, base, object_id)?;
        self.registry.set_int(id, base + 1, dtype as i64)?;
        self.registry.set_uint(id, base + 2, entry as u64)?;
        self.registry.set_uint(id, base + 3, sched_start as u64)?;
        self.registry.set_uint(id, base + 4, sched_end as u64)?;
        Ok(())
    }

    async fn handle_flapping(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        let object_id = self.resolve_subject(input).await?;

        let id = StmtId::HandleFlapping;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
        self.registry.set_int(id, 1, std.tstamp.usec as i64)?;
        self.registry.set_int(id, 2, std.kind_code as i64)?;
        self.registry.set_int(id, 3, std.attr as i64)?;
        self.registry.set_uint(id, 5, object_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_program_status(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let id = StmtId::HandleProgramStatus;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
        self.registry.set_int(id, 1, 1)?;
        self.execute(id).await?;
        self.note_realtime(std.tstamp.sec);
        Ok(())
    }

    async fn handle_host_status(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }
        let object_id =
            self.resolve_or_create(ObjectKind::Host, input.get(Field::Host), None).await?;
        let ctp_id = self
            .resolve_or_create(ObjectKind::TimePeriod, input.get(Field::HostCheckPeriod), None)
            .await?;
        self.save_status(input, StmtId::HandleHostStatus, object_id, ctp_id, std.tstamp).await
    }

    async fn handle_service_status(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }
        let object_id = self
            .resolve_or_create(
                ObjectKind::Service,
                input.get(Field::Host),
                input.get(Field::Service),
            )
            .await?;
        let ctp_id = self
            .resolve_or_create(ObjectKind::TimePeriod, input.get(Field::ServiceCheckPeriod), None)
            .await?;
        self.save_status(input, StmtId::HandleServiceStatus, object_id, ctp_id, std.tstamp).await
    }

    async fn save_status(
        &mut self,
        input: &EventInput,
        id: StmtId,
        object_id: u64,
        ctp_id: u64,
        tstamp: Timeval,
    ) -> Result<()> {
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.registry.set_uint(id, 1, tstamp.sec as u64)?;
        self.registry.set_uint(id, 2, ctp_id)?;
        self.execute(id).await?;
        self.note_realtime(tstamp.sec);
        self.save_custom_variable_status(input, object_id, tstamp.sec).await
    }

    async fn handle_contact_status(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }
        let object_id = self
            .resolve_or_create(ObjectKind::Contact, input.get(Field::ContactName), None)
            .await?;

        let id = StmtId::HandleContactStatus;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.registry.set_uint(id, 1, std.tstamp.sec as u64)?;
        self.execute(id).await?;
        self.note_realtime(std.tstamp.sec);
        self.save_custom_variable_status(input, object_id, std.tstamp.sec).await
    }

    async fn save_custom_variable_status(
        &mut self,
        input: &EventInput,
        object_id: u64,
        t: u32,
    ) -> Result<()> {
        let id = StmtId::SaveCustomVariableStatus;
        let mut failures = 0usize;
        for line in input.lines(MbufKind::CustomVariable) {
            let Some((name, modified, value)) = split_custom_variable(line) else {
                continue;
            };
            self.registry.set_uint(id, 0, object_id)?;
            self.registry.set_uint(id, 1, t as u64)?;
            self.registry.set_int(id, 2, convert::parse_i8(Some(modified)).value as i64)?;
            self.registry.set_str(id, 3, name)?;
            self.registry.set_str(id, 4, value)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "custom variable status save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "custom variable status")
    }

    async fn handle_external_command(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if std.kind_code != subtype::EXTERNALCOMMAND_START {
            return Ok(());
        }
        let id = StmtId::HandleExternalCommand;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_acknowledgement(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        let object_id = self.resolve_subject(input).await?;

        let id = StmtId::HandleAcknowledgement;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
        self.registry.set_int(id, 1, std.tstamp.usec as i64)?;
        self.registry.set_uint(id, 3, object_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_state_change(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        // Only completed state changes carry final state data.
        if std.kind_code != subtype::STATECHANGE_END {
            return Ok(());
        }
        let object_id = self.resolve_subject(input).await?;

        let id = StmtId::HandleStateChange;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, std.tstamp.sec as u64)?;
        self.registry.set_int(id, 1, std.tstamp.usec as i64)?;
        self.registry.set_uint(id, 2, object_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_config_file_variables(
        &mut self,
        input: &EventInput,
        configfile_type: i16,
    ) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let id = StmtId::HandleConfigFile;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_int(id, 0, configfile_type as i64)?;
        let configfile_id = self.execute(id).await?.last_insert_id;

        let id = StmtId::SaveConfigFileVariable;
        let mut failures = 0usize;
        for line in input.lines(MbufKind::ConfigFileVariable) {
            let Some((var, val)) = split_var(line) else {
                continue;
            };
            self.registry.set_uint(id, 0, configfile_id)?;
            self.registry.set_str(id, 1, var)?;
            self.registry.set_str(id, 2, val)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "config file variable save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "config file variable")
    }

    async fn handle_runtime_variables(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let id = StmtId::HandleRuntimeVariable;
        let mut failures = 0usize;
        for line in input.lines(MbufKind::RuntimeVariable) {
            let Some((var, val)) = split_var(line) else {
                continue;
            };
            self.registry.set_str(id, 0, var)?;
            self.registry.set_str(id, 1, val)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "runtime variable save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "runtime variable")
    }

    fn handle_config_dump_start(&mut self, input: &EventInput) {
        let retained = input.get(Field::ConfigDumpType) == Some(CONFIGDUMP_RETAINED);
        self.current_config_type = retained as i8;
    }

    async fn save_host_or_service_definition(
        &mut self,
        input: &EventInput,
        is_service: bool,
    ) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let (check_cmd, event_cmd, check_period, notif_period) = if is_service {
            (
                Field::ServiceCheckCommand,
                Field::ServiceEventHandler,
                Field::ServiceCheckPeriod,
                Field::ServiceNotificationPeriod,
            )
        } else {
            (
                Field::HostCheckCommand,
                Field::HostEventHandler,
                Field::HostCheckPeriod,
                Field::HostNotificationPeriod,
            )
        };

        let (check_name, check_args) = split_bang(input.get(check_cmd));
        let check_command_id =
            self.resolve_or_create(ObjectKind::Command, check_name, None).await?;
        let (event_name, event_args) = split_bang(input.get(event_cmd));
        let event_command_id =
            self.resolve_or_create(ObjectKind::Command, event_name, None).await?;

        let host_object_id =
            self.resolve_or_create(ObjectKind::Host, input.get(Field::HostName), None).await?;
        let (kind, object_id) = if is_service {
            let id = self
                .resolve_or_create(
                    ObjectKind::Service,
                    input.get(Field::HostName),
                    input.get(Field::ServiceDescription),
                )
                .await?;
            (ObjectKind::Service, id)
        } else {
            (ObjectKind::Host, host_object_id)
        };
        self.set_object_active(kind, object_id).await?;

        let check_tp =
            self.resolve_or_create(ObjectKind::TimePeriod, input.get(check_period), None).await?;
        let notif_tp =
            self.resolve_or_create(ObjectKind::TimePeriod, input.get(notif_period), None).await?;

        let id = if is_service { StmtId::HandleService } else { StmtId::HandleHost };
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, host_object_id)?;
        self.registry.set_uint(id, 1, check_command_id)?;
        self.registry.set_str(id, 2, check_args.unwrap_or(""))?;
        self.registry.set_uint(id, 3, event_command_id)?;
        self.registry.set_str(id, 4, event_args.unwrap_or(""))?;
        self.registry.set_uint(id, 5, check_tp)?;
        self.registry.set_uint(id, 6, notif_tp)?;
        if is_service {
            self.registry.set_uint(id, 7, object_id)?;
        }
        let row_id = self.execute(id).await?.last_insert_id;

        let mut failures = 0usize;
        if !is_service {
            if let Err(err) = self
                .save_relations(
                    StmtId::SaveHostParent,
                    row_id,
                    input,
                    MbufKind::ParentHost,
                    ObjectKind::Host,
                    None,
                )
                .await
            {
                tracing::warn!(error = %err, "parent host save failed");
                failures += 1;
            }
        }

        let (cg_stmt, c_stmt) = if is_service {
            (StmtId::SaveServiceContactGroup, StmtId::SaveServiceContact)
        } else {
            (StmtId::SaveHostContactGroup, StmtId::SaveHostContact)
        };
        if let Err(err) = self
            .save_relations(cg_stmt, row_id, input, MbufKind::ContactGroup, ObjectKind::ContactGroup, None)
            .await
        {
            tracing::warn!(error = %err, "contact group save failed");
            failures += 1;
        }
        if let Err(err) = self
            .save_relations(c_stmt, row_id, input, MbufKind::Contact, ObjectKind::Contact, None)
            .await
        {
            tracing::warn!(error = %err, "contact save failed");
            failures += 1;
        }
        if let Err(err) = self.save_custom_variables(input, object_id).await {
            tracing::warn!(error = %err, "custom variable save failed");
            failures += 1;
        }

        ensure_no_failures(failures, "definition sub-record")
    }

    #[allow(clippy::too_many_arguments)]
    async fn save_group_definition(
        &mut self,
        input: &EventInput,
        group_stmt: StmtId,
        group_kind: ObjectKind,
        group_field: Field,
        member_stmt: StmtId,
        member_kind: ObjectKind,
        member_mbuf: MbufKind,
    ) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id = self.resolve_or_create(group_kind, input.get(group_field), None).await?;
        self.set_object_active(group_kind, object_id).await?;

        self.registry.auto_bind(group_stmt, input, self.current_config_type)?;
        self.registry.set_uint(group_stmt, 0, object_id)?;
        let row_id = self.execute(group_stmt).await?.last_insert_id;

        let split = (member_kind == ObjectKind::Service).then_some(';');
        self.save_relations(member_stmt, row_id, input, member_mbuf, member_kind, split).await
    }

    async fn save_dependency_definition(
        &mut self,
        input: &EventInput,
        id: StmtId,
        kind: ObjectKind,
        name2: Option<&str>,
        dependent_name2: Option<&str>,
    ) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id =
            self.resolve_or_create(kind, input.get(Field::HostName), name2).await?;
        let dependent_id = self
            .resolve_or_create(kind, input.get(Field::DependentHostName), dependent_name2)
            .await?;
        let timeperiod_id = self
            .resolve_or_create(ObjectKind::TimePeriod, input.get(Field::DependencyPeriod), None)
            .await?;

        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.registry.set_uint(id, 1, dependent_id)?;
        self.registry.set_uint(id, 2, timeperiod_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn save_escalation_definition(
        &mut self,
        input: &EventInput,
        id: StmtId,
        kind: ObjectKind,
        name2: Option<&str>,
        contact_group_stmt: StmtId,
        contact_stmt: StmtId,
    ) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id =
            self.resolve_or_create(kind, input.get(Field::HostName), name2).await?;
        let timeperiod_id = self
            .resolve_or_create(ObjectKind::TimePeriod, input.get(Field::EscalationPeriod), None)
            .await?;

        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.registry.set_uint(id, 1, timeperiod_id)?;
        let row_id = self.execute(id).await?.last_insert_id;

        let mut failures = 0usize;
        if let Err(err) = self
            .save_relations(
                contact_group_stmt,
                row_id,
                input,
                MbufKind::ContactGroup,
                ObjectKind::ContactGroup,
                None,
            )
            .await
        {
            tracing::warn!(error = %err, "escalation contact group save failed");
            failures += 1;
        }
        if let Err(err) = self
            .save_relations(contact_stmt, row_id, input, MbufKind::Contact, ObjectKind::Contact, None)
            .await
        {
            tracing::warn!(error = %err, "escalation contact save failed");
            failures += 1;
        }
        ensure_no_failures(failures, "escalation sub-record")
    }

    async fn handle_command_definition(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id = self
            .resolve_or_create(ObjectKind::Command, input.get(Field::CommandName), None)
            .await?;
        self.set_object_active(ObjectKind::Command, object_id).await?;

        let id = StmtId::HandleCommand;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.execute(id).await?;
        Ok(())
    }

    async fn handle_timeperiod_definition(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id = self
            .resolve_or_create(ObjectKind::TimePeriod, input.get(Field::TimeperiodName), None)
            .await?;
        self.set_object_active(ObjectKind::TimePeriod, object_id).await?;

        let id = StmtId::HandleTimePeriod;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        let row_id = self.execute(id).await?.last_insert_id;

        let id = StmtId::SaveTimePeriodRange;
        let mut failures = 0usize;
        for line in input.lines(MbufKind::TimeRange) {
            let Some((day, start, end)) = split_time_range(line) else {
                continue;
            };
            self.registry.set_uint(id, 0, row_id)?;
            self.registry.set_int(id, 1, convert::parse_i16(Some(day)).value as i64)?;
            self.registry.set_uint(id, 2, convert::parse_u32(Some(start)).value as u64)?;
            self.registry.set_uint(id, 3, convert::parse_u32(Some(end)).value as u64)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "time range save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "time range")
    }

    async fn handle_contact_definition(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id = self
            .resolve_or_create(ObjectKind::Contact, input.get(Field::ContactName), None)
            .await?;
        self.set_object_active(ObjectKind::Contact, object_id).await?;

        let host_tp = self
            .resolve_or_create(
                ObjectKind::TimePeriod,
                input.get(Field::HostNotificationPeriod),
                None,
            )
            .await?;
        let service_tp = self
            .resolve_or_create(
                ObjectKind::TimePeriod,
                input.get(Field::ServiceNotificationPeriod),
                None,
            )
            .await?;

        let id = StmtId::HandleContact;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        self.registry.set_uint(id, 1, host_tp)?;
        self.registry.set_uint(id, 2, service_tp)?;
        let row_id = self.execute(id).await?.last_insert_id;

        let mut failures = 0usize;
        let id = StmtId::SaveContactAddress;
        for line in input.lines(MbufKind::ContactAddress) {
            let Some((num, addr)) = split_colon_pair(line) else {
                continue;
            };
            self.registry.set_uint(id, 0, row_id)?;
            self.registry.set_int(id, 1, convert::parse_i16(Some(num)).value as i64)?;
            self.registry.set_str(id, 2, addr)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "contact address save failed");
                failures += 1;
            }
        }

        if let Err(err) = self
            .save_contact_commands(
                input,
                row_id,
                subtype::HOST_NOTIFICATION,
                MbufKind::HostNotificationCommand,
            )
            .await
        {
            tracing::warn!(error = %err, "host notification command save failed");
            failures += 1;
        }
        if let Err(err) = self
            .save_contact_commands(
                input,
                row_id,
                subtype::SERVICE_NOTIFICATION,
                MbufKind::ServiceNotificationCommand,
            )
            .await
        {
            tracing::warn!(error = %err, "service notification command save failed");
            failures += 1;
        }
        if let Err(err) = self.save_custom_variables(input, row_id).await {
            tracing::warn!(error = %err, "custom variable save failed");
            failures += 1;
        }

        ensure_no_failures(failures, "contact sub-record")
    }

    async fn save_contact_commands(
        &mut self,
        input: &EventInput,
        contact_id: u64,
        notification_type: i8,
        mbuf: MbufKind,
    ) -> Result<()> {
        let id = StmtId::SaveContactNotificationCommand;
        let mut failures = 0usize;
        for line in input.lines(mbuf) {
            let (name, args) = split_bang(Some(line));
            let name = match name {
                Some(n) if !n.is_empty() => n,
                _ => continue,
            };
            let command_id =
                match self.resolve_or_create(ObjectKind::Command, Some(name), None).await {
                    Ok(0) | Err(_) => {
                        failures += 1;
                        continue;
                    }
                    Ok(v) => v,
                };
            self.registry.set_uint(id, 0, contact_id)?;
            self.registry.set_int(id, 1, notification_type as i64)?;
            self.registry.set_uint(id, 2, command_id)?;
            self.registry.set_str(id, 3, args.unwrap_or(""))?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "notification command save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "notification command")
    }

    async fn handle_contactgroup_definition(&mut self, input: &EventInput) -> Result<()> {
        let std = convert::parse_standard(input);
        if self.is_stale(&std) {
            return Ok(());
        }

        let object_id = self
            .resolve_or_create(ObjectKind::ContactGroup, input.get(Field::ContactGroupName), None)
            .await?;
        self.set_object_active(ObjectKind::ContactGroup, object_id).await?;

        let id = StmtId::HandleContactGroup;
        self.registry.auto_bind(id, input, self.current_config_type)?;
        self.registry.set_uint(id, 0, object_id)?;
        let row_id = self.execute(id).await?.last_insert_id;

        self.save_relations(
            StmtId::SaveContactGroupMember,
            row_id,
            input,
            MbufKind::ContactGroupMember,
            ObjectKind::Contact,
            None,
        )
        .await
    }

    /// Saves one-to-many relation rows, resolving each target name to
    /// an object id. A failed row is logged and skipped so one bad
    /// name doesn't lose the rest.
    async fn save_relations(
        &mut self,
        id: StmtId,
        one_id: u64,
        input: &EventInput,
        mbuf: MbufKind,
        many_kind: ObjectKind,
        split: Option<char>,
    ) -> Result<()> {
        let mut failures = 0usize;
        for line in input.lines(mbuf) {
            if line.is_empty() {
                continue;
            }
            let (n1, n2) = match split {
                Some(tok) => match line.split_once(tok) {
                    Some((a, b)) => (a, Some(b)),
                    None => (line.as_str(), None),
                },
                None => (line.as_str(), None),
            };
            if n1.is_empty() {
                continue;
            }
            // A service needs both names.
            if many_kind == ObjectKind::Service && n2.map_or(true, str::is_empty) {
                continue;
            }
            let many_id = match self.resolve_or_create(many_kind, Some(n1), n2).await {
                Ok(v) => v,
                Err(err) => {
                    tracing::warn!(error = %err, "relation target resolve failed");
                    failures += 1;
                    continue;
                }
            };
            self.registry.set_uint(id, 0, one_id)?;
            self.registry.set_uint(id, 1, many_id)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "relation save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "relation")
    }

    async fn save_custom_variables(&mut self, input: &EventInput, object_id: u64) -> Result<()> {
        let id = StmtId::SaveCustomVariable;
        let config_type = self.current_config_type;
        let mut failures = 0usize;
        for line in input.lines(MbufKind::CustomVariable) {
            let Some((name, modified, value)) = split_custom_variable(line) else {
                continue;
            };
            self.registry.set_uint(id, 0, object_id)?;
            self.registry.set_int(id, 1, config_type as i64)?;
            self.registry.set_int(id, 2, convert::parse_i8(Some(modified)).value as i64)?;
            self.registry.set_str(id, 3, name)?;
            self.registry.set_str(id, 4, value)?;
            if let Err(err) = self.execute(id).await {
                tracing::warn!(error = %err, "custom variable save failed");
                failures += 1;
            }
        }
        ensure_no_failures(failures, "custom variable")
    }
}

fn ensure_no_failures(failures: usize, what: &str) -> Result<()> {
    if failures > 0 {
        bail!("{failures} {what} row(s) failed");
    }
    Ok(())
}

/// Splits a `command!args` value; args are optional.
fn split_bang(raw: Option<&str>) -> (Option<&str>, Option<&str>) {
    match raw {
        Some(s) => match s.split_once('!') {
            Some((name, args)) => (Some(name), Some(args)),
            None => (Some(s), None),
        },
        None => (None, None),
    }
}

/// Splits a `var=val` line; an empty name skips the line, a missing
/// value becomes empty.
fn split_var(line: &str) -> Option<(&str, &str)> {
    let (var, val) = line.split_once('=').unwrap_or((line, ""));
    if var.is_empty() {
        return None;
    }
    Some((var, val))
}

/// Splits a `name:modified:value` custom variable line.
fn split_custom_variable(line: &str) -> Option<(&str, &str, &str)> {
    let (name, rest) = line.split_once(':')?;
    if name.is_empty() || rest.is_empty() {
        return None;
    }
    let (modified, value) = rest.split_once(':').unwrap_or((rest, ""));
    Some((name, modified, value))
}

/// Splits a `day:start-end` time range line; all parts are required.
fn split_time_range(line: &str) -> Option<(&str, &str, &str)> {
    let (day, rest) = line.split_once(':')?;
    let (start, end) = rest.split_once('-')?;
    if day.is_empty() || start.is_empty() || end.is_empty() {
        return None;
    }
    Some((day, start, end))
}

/// Splits a `number:value` contact address line; both parts are
/// required.
fn split_colon_pair(line: &str) -> Option<(&str, &str)> {
    let (a, b) = line.split_once(':')?;
    if a.is_empty() || b.is_empty() {
        return None;
    }
    Some((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bang_split() {
        assert_eq!(split_bang(Some("check_ping!100,20%")), (Some("check_ping"), Some("100,20%")));
        assert_eq!(split_bang(Some("check_ping")), (Some("check_ping"), None));
        assert_eq!(split_bang(None), (None, None));
    }

    #[test]
    fn var_split() {
        assert_eq!(split_var("log_file=/var/log/nagios.log"), Some(("log_file", "/var/log/nagios.log")));
        assert_eq!(split_var("flag"), Some(("flag", "")));
        assert_eq!(split_var("=orphan"), None);
    }

    #[test]
    fn custom_variable_split() {
        assert_eq!(split_custom_variable("_SNMPVERSION:1:2c"), Some(("_SNMPVERSION", "1", "2c")));
        assert_eq!(split_custom_variable("_EMPTYVAL:0:"), Some(("_EMPTYVAL", "0", "")));
        assert_eq!(split_custom_variable("_NOMODIFIED"), None);
        assert_eq!(split_custom_variable(":1:x"), None);
    }

    #[test]
    fn time_range_split() {
        assert_eq!(split_time_range("1:0-86400"), Some(("1", "0", "86400")));
        assert_eq!(split_time_range("1:0"), None);
        assert_eq!(split_time_range("86400"), None);
    }
}
