//! Event-history statements: log entries, process events, timed
//! events, commands, handlers, notifications, comments, downtime,
//! flapping, acknowledgements, and state changes.

use mon2db_core::bind::{BindSpec, BindType};
use mon2db_core::event::Field;
use mon2db_sql::{SqlBuilder, Table};

use crate::statement::{Registry, StmtId};
use crate::Result;

const LOGENTRY_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("logentry_time", BindType::UnixTime, Field::LogEntryTime),
    BindSpec::col("entry_time", BindType::UnixTime),
    BindSpec::col("entry_time_usec", BindType::I32),
    BindSpec::from_field("logentry_type", BindType::I32, Field::LogEntryType),
    BindSpec::from_field("logentry_data", BindType::LongStr, Field::LogEntry),
    BindSpec::col("realtime_data", BindType::I8),
    BindSpec::col("inferred_data_extracted", BindType::I8),
];

const LOGENTRY_EXISTS_PARAMS: &[BindSpec] = &[
    BindSpec::col("logentry_time", BindType::UnixTime),
    BindSpec::col("logentry_data", BindType::LongStr),
];

const PROCESS_PARAMS: &[BindSpec] = &[
    BindSpec::col("event_type", BindType::I32),
    BindSpec::col("event_time", BindType::UnixTime),
    BindSpec::col("event_time_usec", BindType::I32),
    BindSpec::from_field("process_id", BindType::U32, Field::ProcessId),
    BindSpec::from_field("program_name", BindType::ShortStr, Field::ProgramName),
    BindSpec::from_field("program_version", BindType::ShortStr, Field::ProgramVersion),
    BindSpec::from_field("program_date", BindType::ShortStr, Field::ProgramDate),
];

const PROCESS_SHUTDOWN_PARAMS: &[BindSpec] =
    &[BindSpec::col("program_end_time", BindType::UnixTime)];

const TIMEDEVENT_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("event_type", BindType::I16, Field::EventType),
    BindSpec::col("queued_time", BindType::UnixTime),
    BindSpec::col("queued_time_usec", BindType::I32),
    BindSpec::from_field("scheduled_time", BindType::UnixTime, Field::RunTime),
    BindSpec::from_field("recurring_event", BindType::I8, Field::Recurring),
    BindSpec::col("object_id", BindType::U32),
];

const TIMEDEVENT_REMOVE_PARAMS: &[BindSpec] = &[
    BindSpec::col("event_type", BindType::I16),
    BindSpec::col("scheduled_time", BindType::UnixTime),
    BindSpec::col("object_id", BindType::U32),
];

const TIMEDEVENT_SWEEP_PARAMS: &[BindSpec] =
    &[BindSpec::col("scheduled_time", BindType::UnixTime)];

const SYSTEMCOMMAND_PARAMS: &[BindSpec] = &[
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
    BindSpec::from_field("command_line", BindType::ShortStr, Field::CommandLine),
    BindSpec::from_field("timeout", BindType::I16, Field::Timeout),
    BindSpec::from_field("early_timeout", BindType::I8, Field::EarlyTimeout),
    BindSpec::from_field("execution_time", BindType::F64, Field::ExecutionTime),
    BindSpec::from_field("return_code", BindType::I16, Field::ReturnCode),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
];

const EVENTHANDLER_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("eventhandler_type", BindType::I8, Field::EventHandlerType),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::from_field("state", BindType::I8, Field::State),
    BindSpec::from_field("state_type", BindType::I8, Field::StateType),
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
    BindSpec::col("command_object_id", BindType::U32),
    BindSpec::from_field("command_args", BindType::ShortStr, Field::CommandArgs),
    BindSpec::from_field("command_line", BindType::ShortStr, Field::CommandLine),
    BindSpec::from_field("timeout", BindType::I16, Field::Timeout),
    BindSpec::from_field("early_timeout", BindType::I8, Field::EarlyTimeout),
    BindSpec::from_field("execution_time", BindType::F64, Field::ExecutionTime),
    BindSpec::from_field("return_code", BindType::I16, Field::ReturnCode),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
];

const NOTIFICATION_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("notification_type", BindType::I8, Field::NotificationType),
    BindSpec::from_field("notification_reason", BindType::I8, Field::NotificationReason),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
    BindSpec::from_field("state", BindType::I8, Field::State),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
    BindSpec::from_field("escalated", BindType::I8, Field::Escalated),
    BindSpec::from_field("contacts_notified", BindType::I16, Field::ContactsNotified),
];

const CONTACTNOTIFICATION_PARAMS: &[BindSpec] = &[
    BindSpec::col("notification_id", BindType::U32),
    BindSpec::col("contact_object_id", BindType::U32),
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
];

const CONTACTNOTIFICATIONMETHOD_PARAMS: &[BindSpec] = &[
    BindSpec::col("contactnotification_id", BindType::U32),
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
    BindSpec::col("command_object_id", BindType::U32),
    BindSpec::from_field("command_args", BindType::ShortStr, Field::CommandArgs),
];

/// Columns shared by the comment history table and the live comment
/// table.
const COMMENT_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("comment_type", BindType::I8, Field::CommentType),
    BindSpec::from_field("entry_type", BindType::I8, Field::EntryType),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::from_field("comment_time", BindType::UnixTime, Field::CommentTime),
    BindSpec::from_field("internal_comment_id", BindType::U32, Field::CommentId),
    BindSpec::from_field("author_name", BindType::ShortStr, Field::AuthorName),
    BindSpec::from_field("comment_data", BindType::LongStr, Field::Comment),
    BindSpec::from_field("is_persistent", BindType::I8, Field::Persistent),
    BindSpec::from_field("comment_source", BindType::I8, Field::Source),
    BindSpec::from_field("expires", BindType::I8, Field::Expires),
    BindSpec::from_field("expiration_time", BindType::UnixTime, Field::ExpirationTime),
    BindSpec::col("entry_time", BindType::UnixTime).insert_only(),
    BindSpec::col("entry_time_usec", BindType::I32).insert_only(),
];

const COMMENT_DELETE_HISTORY_PARAMS: &[BindSpec] = &[
    BindSpec::col("deletion_time", BindType::UnixTime),
    BindSpec::col("deletion_time_usec", BindType::I32),
    BindSpec::col("comment_time", BindType::UnixTime),
    BindSpec::col("internal_comment_id", BindType::U32),
];

const COMMENT_DELETE_LIVE_PARAMS: &[BindSpec] = &[
    BindSpec::col("comment_time", BindType::UnixTime),
    BindSpec::col("internal_comment_id", BindType::U32),
];

/// Columns shared by the downtime history table and the live
/// scheduled-downtime table.
const DOWNTIME_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("downtime_type", BindType::I8, Field::DowntimeType),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::from_field("entry_time", BindType::UnixTime, Field::EntryTime),
    BindSpec::from_field("author_name", BindType::ShortStr, Field::AuthorName),
    BindSpec::from_field("comment_data", BindType::LongStr, Field::Comment),
    BindSpec::from_field("internal_downtime_id", BindType::U32, Field::DowntimeId),
    BindSpec::from_field("triggered_by_id", BindType::U32, Field::TriggeredBy),
    BindSpec::from_field("is_fixed", BindType::I8, Field::Fixed),
    BindSpec::from_field("duration", BindType::U32, Field::Duration),
    BindSpec::from_field("scheduled_start_time", BindType::UnixTime, Field::StartTime),
    BindSpec::from_field("scheduled_end_time", BindType::UnixTime, Field::EndTime),
];

/// WHERE key identifying one downtime row in either table.
const DOWNTIME_KEY: &str = "object_id=? AND downtime_type=? AND entry_time=FROM_UNIXTIME(?) \
     AND scheduled_start_time=FROM_UNIXTIME(?) AND scheduled_end_time=FROM_UNIXTIME(?)";

const DOWNTIME_KEY_PARAMS: [BindSpec; 5] = [
    BindSpec::col("object_id", BindType::U32),
    BindSpec::col("downtime_type", BindType::I8),
    BindSpec::col("entry_time", BindType::UnixTime),
    BindSpec::col("scheduled_start_time", BindType::UnixTime),
    BindSpec::col("scheduled_end_time", BindType::UnixTime),
];

const DOWNTIME_START_PARAMS: &[BindSpec] = &[
    BindSpec::col("actual_start_time", BindType::UnixTime),
    BindSpec::col("actual_start_time_usec", BindType::I32),
    DOWNTIME_KEY_PARAMS[0],
    DOWNTIME_KEY_PARAMS[1],
    DOWNTIME_KEY_PARAMS[2],
    DOWNTIME_KEY_PARAMS[3],
    DOWNTIME_KEY_PARAMS[4],
];

const DOWNTIME_STOP_PARAMS: &[BindSpec] = &[
    BindSpec::col("actual_end_time", BindType::UnixTime),
    BindSpec::col("actual_end_time_usec", BindType::I32),
    BindSpec::col("was_cancelled", BindType::I8),
    DOWNTIME_KEY_PARAMS[0],
    DOWNTIME_KEY_PARAMS[1],
    DOWNTIME_KEY_PARAMS[2],
    DOWNTIME_KEY_PARAMS[3],
    DOWNTIME_KEY_PARAMS[4],
];

const FLAPPING_PARAMS: &[BindSpec] = &[
    BindSpec::col("event_time", BindType::UnixTime),
    BindSpec::col("event_time_usec", BindType::I32),
    BindSpec::col("event_type", BindType::I16),
    BindSpec::col("reason_type", BindType::I16),
    BindSpec::from_field("flapping_type", BindType::I8, Field::FlappingType),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::from_field("percent_state_change", BindType::F64, Field::PercentStateChange),
    BindSpec::from_field("low_threshold", BindType::F64, Field::LowThreshold),
    BindSpec::from_field("high_threshold", BindType::F64, Field::HighThreshold),
    BindSpec::from_field("comment_time", BindType::UnixTime, Field::CommentTime),
    BindSpec::from_field("internal_comment_id", BindType::U32, Field::CommentId),
];

const EXTERNALCOMMAND_PARAMS: &[BindSpec] = &[
    BindSpec::from_field("command_type", BindType::I16, Field::CommandType),
    BindSpec::from_field("entry_time", BindType::UnixTime, Field::EntryTime),
    BindSpec::from_field("command_name", BindType::ShortStr, Field::CommandString),
    BindSpec::from_field("command_args", BindType::ShortStr, Field::CommandArgs),
];

const ACKNOWLEDGEMENT_PARAMS: &[BindSpec] = &[
    BindSpec::col("entry_time", BindType::UnixTime),
    BindSpec::col("entry_time_usec", BindType::I32),
    BindSpec::from_field("acknowledgement_type", BindType::I8, Field::AcknowledgementType),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::from_field("state", BindType::I8, Field::State),
    BindSpec::from_field("author_name", BindType::ShortStr, Field::AuthorName),
    BindSpec::from_field("comment_data", BindType::LongStr, Field::Comment),
    BindSpec::from_field("is_sticky", BindType::I8, Field::StickyAcknowledgement),
    BindSpec::from_field("persistent_comment", BindType::I8, Field::PersistentComment),
    BindSpec::from_field("notify_contacts", BindType::I8, Field::NotifyContacts),
];

const STATECHANGE_PARAMS: &[BindSpec] = &[
    BindSpec::col("state_time", BindType::UnixTime),
    BindSpec::col("state_time_usec", BindType::I32),
    BindSpec::col("object_id", BindType::U32),
    BindSpec::from_field("state_change", BindType::I8, Field::StateChange),
    BindSpec::from_field("state", BindType::I8, Field::State),
    BindSpec::from_field("state_type", BindType::I8, Field::StateType),
    BindSpec::from_field("current_check_attempt", BindType::I16, Field::CurrentCheckAttempt),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::MaxCheckAttempts),
    BindSpec::from_field("last_state", BindType::I8, Field::LastState),
    BindSpec::from_field("last_hard_state", BindType::I8, Field::LastHardState),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
];

pub(crate) fn prepare(reg: &mut Registry, sql: &SqlBuilder) -> Result<()> {
    reg.prepare(
        StmtId::HandleLogEntry,
        sql.insert(Table::LogEntries, LOGENTRY_PARAMS),
        LOGENTRY_PARAMS,
    )?;
    reg.prepare(
        StmtId::LogEntryExists,
        sql.select_where(
            Table::LogEntries,
            "logentry_id",
            "logentry_time=FROM_UNIXTIME(?) AND logentry_data=?",
        ),
        LOGENTRY_EXISTS_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleProcess,
        sql.insert(Table::ProcessEvents, PROCESS_PARAMS),
        PROCESS_PARAMS,
    )?;
    reg.prepare(
        StmtId::UpdateProcessShutdown,
        sql.update(
            Table::ProgramStatus,
            "program_end_time=FROM_UNIXTIME(?),is_currently_running=0",
            "",
        ),
        PROCESS_SHUTDOWN_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleTimedEvent,
        sql.upsert(Table::TimedEvents, TIMEDEVENT_PARAMS),
        TIMEDEVENT_PARAMS,
    )?;
    reg.prepare(
        StmtId::TimedEventQueueAdd,
        sql.insert(Table::TimedEventQueue, TIMEDEVENT_PARAMS),
        TIMEDEVENT_PARAMS,
    )?;
    reg.prepare(
        StmtId::TimedEventQueueRemove,
        sql.delete(
            Table::TimedEventQueue,
            "event_type=? AND scheduled_time=FROM_UNIXTIME(?) AND object_id=?",
        ),
        TIMEDEVENT_REMOVE_PARAMS,
    )?;
    reg.prepare(
        StmtId::TimedEventQueueSweep,
        sql.delete(Table::TimedEventQueue, "scheduled_time<FROM_UNIXTIME(?)"),
        TIMEDEVENT_SWEEP_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleSystemCommand,
        sql.upsert(Table::SystemCommands, SYSTEMCOMMAND_PARAMS),
        SYSTEMCOMMAND_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleEventHandler,
        sql.upsert(Table::EventHandlers, EVENTHANDLER_PARAMS),
        EVENTHANDLER_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleNotification,
        sql.upsert(Table::Notifications, NOTIFICATION_PARAMS),
        NOTIFICATION_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleContactNotification,
        sql.upsert(Table::ContactNotifications, CONTACTNOTIFICATION_PARAMS),
        CONTACTNOTIFICATION_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleContactNotificationMethod,
        sql.upsert(
            Table::ContactNotificationMethods,
            CONTACTNOTIFICATIONMETHOD_PARAMS,
        ),
        CONTACTNOTIFICATIONMETHOD_PARAMS,
    )?;
    reg.prepare(
        StmtId::CommentAddHistory,
        sql.upsert(Table::CommentHistory, COMMENT_PARAMS),
        COMMENT_PARAMS,
    )?;
    reg.prepare(
        StmtId::CommentAddLive,
        sql.upsert(Table::Comments, COMMENT_PARAMS),
        COMMENT_PARAMS,
    )?;
    reg.prepare(
        StmtId::CommentDeleteHistory,
        sql.update(
            Table::CommentHistory,
            "deletion_time=FROM_UNIXTIME(?),deletion_time_usec=?",
            "comment_time=FROM_UNIXTIME(?) AND internal_comment_id=?",
        ),
        COMMENT_DELETE_HISTORY_PARAMS,
    )?;
    reg.prepare(
        StmtId::CommentDeleteLive,
        sql.delete(
            Table::Comments,
            "comment_time=FROM_UNIXTIME(?) AND internal_comment_id=?",
        ),
        COMMENT_DELETE_LIVE_PARAMS,
    )?;
    reg.prepare(
        StmtId::DowntimeAddHistory,
        sql.upsert(Table::DowntimeHistory, DOWNTIME_PARAMS),
        DOWNTIME_PARAMS,
    )?;
    reg.prepare(
        StmtId::DowntimeAddLive,
        sql.upsert(Table::ScheduledDowntime, DOWNTIME_PARAMS),
        DOWNTIME_PARAMS,
    )?;
    reg.prepare(
        StmtId::DowntimeStartHistory,
        sql.update(
            Table::DowntimeHistory,
            "actual_start_time=FROM_UNIXTIME(?),actual_start_time_usec=?,was_started=1",
            DOWNTIME_KEY,
        ),
        DOWNTIME_START_PARAMS,
    )?;
    reg.prepare(
        StmtId::DowntimeStartLive,
        sql.update(
            Table::ScheduledDowntime,
            "actual_start_time=FROM_UNIXTIME(?),actual_start_time_usec=?,was_started=1",
            DOWNTIME_KEY,
        ),
        DOWNTIME_START_PARAMS,
    )?;
    reg.prepare(
        StmtId::DowntimeStopHistory,
        sql.update(
            Table::DowntimeHistory,
            "actual_end_time=FROM_UNIXTIME(?),actual_end_time_usec=?,was_cancelled=?",
            DOWNTIME_KEY,
        ),
        DOWNTIME_STOP_PARAMS,
    )?;
    reg.prepare(
        StmtId::DowntimeDeleteLive,
        sql.delete(Table::ScheduledDowntime, DOWNTIME_KEY),
        &DOWNTIME_KEY_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleFlapping,
        sql.insert(Table::FlappingHistory, FLAPPING_PARAMS),
        FLAPPING_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleExternalCommand,
        sql.insert(Table::ExternalCommands, EXTERNALCOMMAND_PARAMS),
        EXTERNALCOMMAND_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleAcknowledgement,
        sql.insert(Table::Acknowledgements, ACKNOWLEDGEMENT_PARAMS),
        ACKNOWLEDGEMENT_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleStateChange,
        sql.insert(Table::StateHistory, STATECHANGE_PARAMS),
        STATECHANGE_PARAMS,
    )?;
    Ok(())
}
