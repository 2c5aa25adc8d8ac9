//! Current-state statements: check results, host/service/contact
//! status, program status, and custom variable status.

use mon2db_core::bind::{BindSpec, BindType};
use mon2db_core::event::Field;
use mon2db_sql::{SqlBuilder, Table};

use crate::statement::{Registry, StmtId};
use crate::Result;

/// Service checks. The first six columns are set by the handler; the
/// command columns survive only on first insert so a processed check
/// does not wipe what the initiate event recorded.
const SERVICECHECK_PARAMS: &[BindSpec] = &[
    BindSpec::col("service_object_id", BindType::U32),
    BindSpec::col("command_object_id", BindType::U32).insert_only(),
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
    BindSpec::from_field("check_type", BindType::I8, Field::CheckType),
    BindSpec::from_field("current_check_attempt", BindType::I16, Field::CurrentCheckAttempt),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::MaxCheckAttempts),
    BindSpec::from_field("state", BindType::I8, Field::State),
    BindSpec::from_field("state_type", BindType::I8, Field::StateType),
    BindSpec::from_field("timeout", BindType::I8, Field::Timeout),
    BindSpec::from_field("early_timeout", BindType::I8, Field::EarlyTimeout),
    BindSpec::from_field("execution_time", BindType::F64, Field::ExecutionTime),
    BindSpec::from_field("latency", BindType::F64, Field::Latency),
    BindSpec::from_field("return_code", BindType::I16, Field::ReturnCode),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
    BindSpec::from_field("perfdata", BindType::LongStr, Field::Perfdata),
    BindSpec::from_field("command_args", BindType::ShortStr, Field::CommandArgs).insert_only(),
    BindSpec::from_field("command_line", BindType::ShortStr, Field::CommandLine).insert_only(),
];

/// Host checks add an is_raw_check column at index 6.
const HOSTCHECK_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_object_id", BindType::U32),
    BindSpec::col("command_object_id", BindType::U32).insert_only(),
    BindSpec::col("start_time", BindType::UnixTime),
    BindSpec::col("start_time_usec", BindType::I32),
    BindSpec::col("end_time", BindType::UnixTime),
    BindSpec::col("end_time_usec", BindType::I32),
    BindSpec::col("is_raw_check", BindType::I8),
    BindSpec::from_field("check_type", BindType::I8, Field::CheckType),
    BindSpec::from_field("current_check_attempt", BindType::I16, Field::CurrentCheckAttempt),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::MaxCheckAttempts),
    BindSpec::from_field("state", BindType::I8, Field::State),
    BindSpec::from_field("state_type", BindType::I8, Field::StateType),
    BindSpec::from_field("timeout", BindType::I16, Field::Timeout),
    BindSpec::from_field("early_timeout", BindType::I8, Field::EarlyTimeout),
    BindSpec::from_field("execution_time", BindType::F64, Field::ExecutionTime),
    BindSpec::from_field("latency", BindType::F64, Field::Latency),
    BindSpec::from_field("return_code", BindType::I16, Field::ReturnCode),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
    BindSpec::from_field("perfdata", BindType::LongStr, Field::Perfdata),
    BindSpec::from_field("command_args", BindType::ShortStr, Field::CommandArgs).insert_only(),
    BindSpec::from_field("command_line", BindType::ShortStr, Field::CommandLine).insert_only(),
];

const HOSTSTATUS_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_object_id", BindType::U32),
    BindSpec::col("status_update_time", BindType::UnixTime),
    BindSpec::col("check_timeperiod_object_id", BindType::U32),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
    BindSpec::from_field("perfdata", BindType::LongStr, Field::Perfdata),
    BindSpec::from_field("current_state", BindType::I8, Field::CurrentState),
    BindSpec::from_field("has_been_checked", BindType::I8, Field::HasBeenChecked),
    BindSpec::from_field("should_be_scheduled", BindType::I8, Field::ShouldBeScheduled),
    BindSpec::from_field("current_check_attempt", BindType::I16, Field::CurrentCheckAttempt),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::MaxCheckAttempts),
    BindSpec::from_field("last_check", BindType::UnixTime, Field::LastHostCheck),
    BindSpec::from_field("next_check", BindType::UnixTime, Field::NextHostCheck),
    BindSpec::from_field("check_type", BindType::I8, Field::CheckType),
    BindSpec::from_field("last_state_change", BindType::UnixTime, Field::LastStateChange),
    BindSpec::from_field("last_hard_state_change", BindType::UnixTime, Field::LastHardStateChange),
    BindSpec::from_field("last_hard_state", BindType::I8, Field::LastHardState),
    BindSpec::from_field("last_time_up", BindType::UnixTime, Field::LastTimeUp),
    BindSpec::from_field("last_time_down", BindType::UnixTime, Field::LastTimeDown),
    BindSpec::from_field("last_time_unreachable", BindType::UnixTime, Field::LastTimeUnreachable),
    BindSpec::from_field("state_type", BindType::I8, Field::StateType),
    BindSpec::from_field("last_notification", BindType::UnixTime, Field::LastHostNotification),
    BindSpec::from_field("next_notification", BindType::UnixTime, Field::NextHostNotification),
    BindSpec::from_field("no_more_notifications", BindType::I8, Field::NoMoreNotifications),
    BindSpec::from_field("notifications_enabled", BindType::I8, Field::NotificationsEnabled),
    BindSpec::from_field(
        "problem_has_been_acknowledged",
        BindType::I8,
        Field::ProblemHasBeenAcknowledged,
    ),
    BindSpec::from_field("acknowledgement_type", BindType::I8, Field::AcknowledgementType),
    BindSpec::from_field(
        "current_notification_number",
        BindType::I16,
        Field::CurrentNotificationNumber,
    ),
    BindSpec::from_field("passive_checks_enabled", BindType::I8, Field::PassiveHostChecksEnabled),
    BindSpec::from_field("active_checks_enabled", BindType::I8, Field::ActiveHostChecksEnabled),
    BindSpec::from_field("event_handler_enabled", BindType::I8, Field::EventHandlerEnabled),
    BindSpec::from_field("flap_detection_enabled", BindType::I8, Field::FlapDetectionEnabled),
    BindSpec::from_field("is_flapping", BindType::I8, Field::IsFlapping),
    BindSpec::from_field("percent_state_change", BindType::F64, Field::PercentStateChange),
    BindSpec::from_field("latency", BindType::F64, Field::Latency),
    BindSpec::from_field("execution_time", BindType::F64, Field::ExecutionTime),
    BindSpec::from_field("scheduled_downtime_depth", BindType::I16, Field::ScheduledDowntimeDepth),
    BindSpec::from_field(
        "failure_prediction_enabled",
        BindType::I8,
        Field::FailurePredictionEnabled,
    ),
    BindSpec::from_field("process_performance_data", BindType::I8, Field::ProcessPerformanceData),
    BindSpec::from_field("obsess_over_host", BindType::I8, Field::ObsessOverHost),
    BindSpec::from_field("modified_host_attributes", BindType::U32, Field::ModifiedHostAttributes),
    BindSpec::from_field("event_handler", BindType::ShortStr, Field::EventHandler),
    BindSpec::from_field("check_command", BindType::ShortStr, Field::CheckCommand),
    BindSpec::from_field("normal_check_interval", BindType::F64, Field::NormalCheckInterval),
    BindSpec::from_field("retry_check_interval", BindType::F64, Field::RetryCheckInterval),
];

const SERVICESTATUS_PARAMS: &[BindSpec] = &[
    BindSpec::col("service_object_id", BindType::U32),
    BindSpec::col("status_update_time", BindType::UnixTime),
    BindSpec::col("check_timeperiod_object_id", BindType::U32),
    BindSpec::from_field("output", BindType::ShortStr, Field::Output),
    BindSpec::from_field("long_output", BindType::LongStr, Field::LongOutput),
    BindSpec::from_field("perfdata", BindType::LongStr, Field::Perfdata),
    BindSpec::from_field("current_state", BindType::I8, Field::CurrentState),
    BindSpec::from_field("has_been_checked", BindType::I8, Field::HasBeenChecked),
    BindSpec::from_field("should_be_scheduled", BindType::I8, Field::ShouldBeScheduled),
    BindSpec::from_field("current_check_attempt", BindType::I16, Field::CurrentCheckAttempt),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::MaxCheckAttempts),
    BindSpec::from_field("last_check", BindType::UnixTime, Field::LastServiceCheck),
    BindSpec::from_field("next_check", BindType::UnixTime, Field::NextServiceCheck),
    BindSpec::from_field("check_type", BindType::I8, Field::CheckType),
    BindSpec::from_field("last_state_change", BindType::UnixTime, Field::LastStateChange),
    BindSpec::from_field("last_hard_state_change", BindType::UnixTime, Field::LastHardStateChange),
    BindSpec::from_field("last_hard_state", BindType::I8, Field::LastHardState),
    BindSpec::from_field("last_time_ok", BindType::UnixTime, Field::LastTimeOk),
    BindSpec::from_field("last_time_warning", BindType::UnixTime, Field::LastTimeWarning),
    BindSpec::from_field("last_time_unknown", BindType::UnixTime, Field::LastTimeUnknown),
    BindSpec::from_field("last_time_critical", BindType::UnixTime, Field::LastTimeCritical),
    BindSpec::from_field("state_type", BindType::I8, Field::StateType),
    BindSpec::from_field("last_notification", BindType::UnixTime, Field::LastServiceNotification),
    BindSpec::from_field("next_notification", BindType::UnixTime, Field::NextServiceNotification),
    BindSpec::from_field("no_more_notifications", BindType::I8, Field::NoMoreNotifications),
    BindSpec::from_field("notifications_enabled", BindType::I8, Field::NotificationsEnabled),
    BindSpec::from_field(
        "problem_has_been_acknowledged",
        BindType::I8,
        Field::ProblemHasBeenAcknowledged,
    ),
    BindSpec::from_field("acknowledgement_type", BindType::I8, Field::AcknowledgementType),
    BindSpec::from_field(
        "current_notification_number",
        BindType::I16,
        Field::CurrentNotificationNumber,
    ),
    BindSpec::from_field(
        "passive_checks_enabled",
        BindType::I8,
        Field::PassiveServiceChecksEnabled,
    ),
    BindSpec::from_field("active_checks_enabled", BindType::I8, Field::ActiveServiceChecksEnabled),
    BindSpec::from_field("event_handler_enabled", BindType::I8, Field::EventHandlerEnabled),
    BindSpec::from_field("flap_detection_enabled", BindType::I8, Field::FlapDetectionEnabled),
    BindSpec::from_field("is_flapping", BindType::I8, Field::IsFlapping),
    BindSpec::from_field("percent_state_change", BindType::F64, Field::PercentStateChange),
    BindSpec::from_field("latency", BindType::F64, Field::Latency),
    BindSpec::from_field("execution_time", BindType::F64, Field::ExecutionTime),
    BindSpec::from_field("scheduled_downtime_depth", BindType::I16, Field::ScheduledDowntimeDepth),
    BindSpec::from_field(
        "failure_prediction_enabled",
        BindType::I8,
        Field::FailurePredictionEnabled,
    ),
    BindSpec::from_field("process_performance_data", BindType::I8, Field::ProcessPerformanceData),
    BindSpec::from_field("obsess_over_service", BindType::I8, Field::ObsessOverService),
    BindSpec::from_field(
        "modified_service_attributes",
        BindType::U32,
        Field::ModifiedServiceAttributes,
    ),
    BindSpec::from_field("event_handler", BindType::ShortStr, Field::EventHandler),
    BindSpec::from_field("check_command", BindType::ShortStr, Field::CheckCommand),
    BindSpec::from_field("normal_check_interval", BindType::F64, Field::NormalCheckInterval),
    BindSpec::from_field("retry_check_interval", BindType::F64, Field::RetryCheckInterval),
];

const CONTACTSTATUS_PARAMS: &[BindSpec] = &[
    BindSpec::col("contact_object_id", BindType::U32),
    BindSpec::col("status_update_time", BindType::UnixTime),
    BindSpec::from_field(
        "host_notifications_enabled",
        BindType::I8,
        Field::HostNotificationsEnabled,
    ),
    BindSpec::from_field(
        "service_notifications_enabled",
        BindType::I8,
        Field::ServiceNotificationsEnabled,
    ),
    BindSpec::from_field("last_host_notification", BindType::UnixTime, Field::LastHostNotification),
    BindSpec::from_field(
        "last_service_notification",
        BindType::UnixTime,
        Field::LastServiceNotification,
    ),
    BindSpec::from_field("modified_attributes", BindType::U32, Field::ModifiedContactAttributes),
    BindSpec::from_field(
        "modified_host_attributes",
        BindType::U32,
        Field::ModifiedHostAttributes,
    ),
    BindSpec::from_field(
        "modified_service_attributes",
        BindType::U32,
        Field::ModifiedServiceAttributes,
    ),
];

const PROGRAMSTATUS_PARAMS: &[BindSpec] = &[
    BindSpec::col("status_update_time", BindType::UnixTime),
    BindSpec::col("is_currently_running", BindType::I8),
    BindSpec::from_field("program_start_time", BindType::UnixTime, Field::ProgramStartTime),
    BindSpec::from_field("process_id", BindType::U32, Field::ProcessId),
    BindSpec::from_field("daemon_mode", BindType::I8, Field::DaemonMode),
    BindSpec::from_field("last_command_check", BindType::UnixTime, Field::LastCommandCheck),
    BindSpec::from_field("last_log_rotation", BindType::UnixTime, Field::LastLogRotation),
    BindSpec::from_field("notifications_enabled", BindType::I8, Field::NotificationsEnabled),
    BindSpec::from_field(
        "active_service_checks_enabled",
        BindType::I8,
        Field::ActiveServiceChecksEnabled,
    ),
    BindSpec::from_field(
        "passive_service_checks_enabled",
        BindType::I8,
        Field::PassiveServiceChecksEnabled,
    ),
    BindSpec::from_field(
        "active_host_checks_enabled",
        BindType::I8,
        Field::ActiveHostChecksEnabled,
    ),
    BindSpec::from_field(
        "passive_host_checks_enabled",
        BindType::I8,
        Field::PassiveHostChecksEnabled,
    ),
    BindSpec::from_field("event_handlers_enabled", BindType::I8, Field::EventHandlersEnabled),
    BindSpec::from_field("flap_detection_enabled", BindType::I8, Field::FlapDetectionEnabled),
    BindSpec::from_field(
        "failure_prediction_enabled",
        BindType::I8,
        Field::FailurePredictionEnabled,
    ),
    BindSpec::from_field("process_performance_data", BindType::I8, Field::ProcessPerformanceData),
    BindSpec::from_field("obsess_over_hosts", BindType::I8, Field::ObsessOverHosts),
    BindSpec::from_field("obsess_over_services", BindType::I8, Field::ObsessOverServices),
    BindSpec::from_field(
        "modified_host_attributes",
        BindType::U32,
        Field::ModifiedHostAttributes,
    ),
    BindSpec::from_field(
        "modified_service_attributes",
        BindType::U32,
        Field::ModifiedServiceAttributes,
    ),
    BindSpec::from_field(
        "global_host_event_handler",
        BindType::ShortStr,
        Field::GlobalHostEventHandler,
    ),
    BindSpec::from_field(
        "global_service_event_handler",
        BindType::ShortStr,
        Field::GlobalServiceEventHandler,
    ),
];

const CUSTOMVARIABLESTATUS_PARAMS: &[BindSpec] = &[
    BindSpec::col("object_id", BindType::U32),
    BindSpec::col("status_update_time", BindType::UnixTime),
    BindSpec::col("has_been_modified", BindType::I8),
    BindSpec::col("varname", BindType::ShortStr),
    BindSpec::col("varvalue", BindType::ShortStr),
];

pub(crate) fn prepare(reg: &mut Registry, sql: &SqlBuilder) -> Result<()> {
    reg.prepare(
        StmtId::HandleServiceCheck,
        sql.upsert(Table::ServiceChecks, SERVICECHECK_PARAMS),
        SERVICECHECK_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleHostCheck,
        sql.upsert(Table::HostChecks, HOSTCHECK_PARAMS),
        HOSTCHECK_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleHostStatus,
        sql.upsert(Table::HostStatus, HOSTSTATUS_PARAMS),
        HOSTSTATUS_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleServiceStatus,
        sql.upsert(Table::ServiceStatus, SERVICESTATUS_PARAMS),
        SERVICESTATUS_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleContactStatus,
        sql.upsert(Table::ContactStatus, CONTACTSTATUS_PARAMS),
        CONTACTSTATUS_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleProgramStatus,
        sql.upsert(Table::ProgramStatus, PROGRAMSTATUS_PARAMS),
        PROGRAMSTATUS_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveCustomVariableStatus,
        sql.upsert(Table::CustomVariableStatus, CUSTOMVARIABLESTATUS_PARAMS),
        CUSTOMVARIABLESTATUS_PARAMS,
    )?;
    Ok(())
}
