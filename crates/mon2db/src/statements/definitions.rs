//! Object-definition statements dumped at configuration time: hosts,
//! services, groups, dependencies, escalations, commands, time
//! periods, contacts, and custom variables.
//!
//! The host table is the widest statement in the registry and sets the
//! scratch pool's capacity on most banks.

use mon2db_core::bind::{BindSpec, BindType};
use mon2db_core::event::Field;
use mon2db_sql::{SqlBuilder, Table};

use crate::statement::{Registry, StmtId};
use crate::Result;

const HOST_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_object_id", BindType::U32),
    BindSpec::col("check_command_object_id", BindType::U32),
    BindSpec::col("check_command_args", BindType::ShortStr),
    BindSpec::col("eventhandler_command_object_id", BindType::U32),
    BindSpec::col("eventhandler_command_args", BindType::ShortStr),
    BindSpec::col("check_timeperiod_object_id", BindType::U32),
    BindSpec::col("notification_timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("alias", BindType::ShortStr, Field::HostAlias),
    BindSpec::from_field("display_name", BindType::ShortStr, Field::DisplayName),
    BindSpec::from_field("address", BindType::ShortStr, Field::HostAddress),
    BindSpec::from_field(
        "failure_prediction_options",
        BindType::ShortStr,
        Field::HostFailurePredictionOptions,
    ),
    BindSpec::from_field("check_interval", BindType::F64, Field::HostCheckInterval),
    BindSpec::from_field("retry_interval", BindType::F64, Field::HostRetryInterval),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::HostMaxCheckAttempts),
    BindSpec::from_field(
        "first_notification_delay",
        BindType::F64,
        Field::FirstNotificationDelay,
    ),
    BindSpec::from_field(
        "notification_interval",
        BindType::F64,
        Field::HostNotificationInterval,
    ),
    BindSpec::from_field("notify_on_down", BindType::I8, Field::NotifyHostDown),
    BindSpec::from_field("notify_on_unreachable", BindType::I8, Field::NotifyHostUnreachable),
    BindSpec::from_field("notify_on_recovery", BindType::I8, Field::NotifyHostRecovery),
    BindSpec::from_field("notify_on_flapping", BindType::I8, Field::NotifyHostFlapping),
    BindSpec::from_field("notify_on_downtime", BindType::I8, Field::NotifyHostDowntime),
    BindSpec::from_field("stalk_on_up", BindType::I8, Field::StalkHostOnUp),
    BindSpec::from_field("stalk_on_down", BindType::I8, Field::StalkHostOnDown),
    BindSpec::from_field("stalk_on_unreachable", BindType::I8, Field::StalkHostOnUnreachable),
    BindSpec::from_field(
        "flap_detection_enabled",
        BindType::I8,
        Field::HostFlapDetectionEnabled,
    ),
    BindSpec::from_field("flap_detection_on_up", BindType::I8, Field::FlapDetectionOnUp),
    BindSpec::from_field("flap_detection_on_down", BindType::I8, Field::FlapDetectionOnDown),
    BindSpec::from_field(
        "flap_detection_on_unreachable",
        BindType::I8,
        Field::FlapDetectionOnUnreachable,
    ),
    BindSpec::from_field("low_flap_threshold", BindType::F64, Field::LowHostFlapThreshold),
    BindSpec::from_field("high_flap_threshold", BindType::F64, Field::HighHostFlapThreshold),
    BindSpec::from_field(
        "process_performance_data",
        BindType::I8,
        Field::ProcessHostPerformanceData,
    ),
    BindSpec::from_field(
        "freshness_checks_enabled",
        BindType::I8,
        Field::HostFreshnessChecksEnabled,
    ),
    BindSpec::from_field("freshness_threshold", BindType::I16, Field::HostFreshnessThreshold),
    BindSpec::from_field(
        "passive_checks_enabled",
        BindType::I8,
        Field::PassiveHostChecksEnabled,
    ),
    BindSpec::from_field(
        "event_handler_enabled",
        BindType::I8,
        Field::HostEventHandlerEnabled,
    ),
    BindSpec::from_field("active_checks_enabled", BindType::I8, Field::ActiveHostChecksEnabled),
    BindSpec::from_field(
        "retain_status_information",
        BindType::I8,
        Field::RetainHostStatusInformation,
    ),
    BindSpec::from_field(
        "retain_nonstatus_information",
        BindType::I8,
        Field::RetainHostNonstatusInformation,
    ),
    BindSpec::from_field(
        "notifications_enabled",
        BindType::I8,
        Field::HostNotificationsEnabled,
    ),
    BindSpec::from_field("obsess_over_host", BindType::I8, Field::ObsessOverHost),
    BindSpec::from_field(
        "failure_prediction_enabled",
        BindType::I8,
        Field::HostFailurePredictionEnabled,
    ),
    BindSpec::from_field("notes", BindType::ShortStr, Field::Notes),
    BindSpec::from_field("notes_url", BindType::ShortStr, Field::NotesUrl),
    BindSpec::from_field("action_url", BindType::ShortStr, Field::ActionUrl),
    BindSpec::from_field("icon_image", BindType::ShortStr, Field::IconImage),
    BindSpec::from_field("icon_image_alt", BindType::ShortStr, Field::IconImageAlt),
    BindSpec::from_field("vrml_image", BindType::ShortStr, Field::VrmlImage),
    BindSpec::from_field("statusmap_image", BindType::ShortStr, Field::StatusmapImage),
    BindSpec::from_field("have_2d_coords", BindType::I8, Field::Have2dCoords),
    BindSpec::from_field("x_2d", BindType::I16, Field::X2d),
    BindSpec::from_field("y_2d", BindType::I16, Field::Y2d),
    BindSpec::from_field("have_3d_coords", BindType::I8, Field::Have3dCoords),
    BindSpec::from_field("x_3d", BindType::F64, Field::X3d),
    BindSpec::from_field("y_3d", BindType::F64, Field::Y3d),
    BindSpec::from_field("z_3d", BindType::F64, Field::Z3d),
    BindSpec::from_field("importance", BindType::I32, Field::Importance),
];

const HOST_PARENT_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_id", BindType::U32),
    BindSpec::col("parent_host_object_id", BindType::U32),
];

const HOST_CONTACTGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_id", BindType::U32),
    BindSpec::col("contactgroup_object_id", BindType::U32),
];

const HOST_CONTACT_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_id", BindType::U32),
    BindSpec::col("contact_object_id", BindType::U32),
];

const HOSTGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("hostgroup_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("alias", BindType::ShortStr, Field::HostGroupAlias),
];

const HOSTGROUP_MEMBER_PARAMS: &[BindSpec] = &[
    BindSpec::col("hostgroup_id", BindType::U32),
    BindSpec::col("host_object_id", BindType::U32),
];

const SERVICE_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_object_id", BindType::U32),
    BindSpec::col("check_command_object_id", BindType::U32),
    BindSpec::col("check_command_args", BindType::ShortStr),
    BindSpec::col("eventhandler_command_object_id", BindType::U32),
    BindSpec::col("eventhandler_command_args", BindType::ShortStr),
    BindSpec::col("check_timeperiod_object_id", BindType::U32),
    BindSpec::col("notification_timeperiod_object_id", BindType::U32),
    BindSpec::col("service_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("display_name", BindType::ShortStr, Field::DisplayName),
    BindSpec::from_field(
        "failure_prediction_options",
        BindType::ShortStr,
        Field::ServiceFailurePredictionOptions,
    ),
    BindSpec::from_field("check_interval", BindType::F64, Field::ServiceCheckInterval),
    BindSpec::from_field("retry_interval", BindType::F64, Field::ServiceRetryInterval),
    BindSpec::from_field("max_check_attempts", BindType::I16, Field::MaxServiceCheckAttempts),
    BindSpec::from_field(
        "first_notification_delay",
        BindType::F64,
        Field::FirstNotificationDelay,
    ),
    BindSpec::from_field(
        "notification_interval",
        BindType::F64,
        Field::ServiceNotificationInterval,
    ),
    BindSpec::from_field("notify_on_warning", BindType::I8, Field::NotifyServiceWarning),
    BindSpec::from_field("notify_on_unknown", BindType::I8, Field::NotifyServiceUnknown),
    BindSpec::from_field("notify_on_critical", BindType::I8, Field::NotifyServiceCritical),
    BindSpec::from_field("notify_on_recovery", BindType::I8, Field::NotifyServiceRecovery),
    BindSpec::from_field("notify_on_flapping", BindType::I8, Field::NotifyServiceFlapping),
    BindSpec::from_field("notify_on_downtime", BindType::I8, Field::NotifyServiceDowntime),
    BindSpec::from_field("stalk_on_ok", BindType::I8, Field::StalkServiceOnOk),
    BindSpec::from_field("stalk_on_warning", BindType::I8, Field::StalkServiceOnWarning),
    BindSpec::from_field("stalk_on_unknown", BindType::I8, Field::StalkServiceOnUnknown),
    BindSpec::from_field("stalk_on_critical", BindType::I8, Field::StalkServiceOnCritical),
    BindSpec::from_field("is_volatile", BindType::I8, Field::ServiceIsVolatile),
    BindSpec::from_field(
        "flap_detection_enabled",
        BindType::I8,
        Field::ServiceFlapDetectionEnabled,
    ),
    BindSpec::from_field("flap_detection_on_ok", BindType::I8, Field::FlapDetectionOnOk),
    BindSpec::from_field(
        "flap_detection_on_warning",
        BindType::I8,
        Field::FlapDetectionOnWarning,
    ),
    BindSpec::from_field(
        "flap_detection_on_unknown",
        BindType::I8,
        Field::FlapDetectionOnUnknown,
    ),
    BindSpec::from_field(
        "flap_detection_on_critical",
        BindType::I8,
        Field::FlapDetectionOnCritical,
    ),
    BindSpec::from_field("low_flap_threshold", BindType::F64, Field::LowServiceFlapThreshold),
    BindSpec::from_field("high_flap_threshold", BindType::F64, Field::HighServiceFlapThreshold),
    BindSpec::from_field(
        "process_performance_data",
        BindType::I8,
        Field::ProcessServicePerformanceData,
    ),
    BindSpec::from_field(
        "freshness_checks_enabled",
        BindType::I8,
        Field::ServiceFreshnessChecksEnabled,
    ),
    BindSpec::from_field(
        "freshness_threshold",
        BindType::I16,
        Field::ServiceFreshnessThreshold,
    ),
    BindSpec::from_field(
        "passive_checks_enabled",
        BindType::I8,
        Field::PassiveServiceChecksEnabled,
    ),
    BindSpec::from_field(
        "event_handler_enabled",
        BindType::I8,
        Field::ServiceEventHandlerEnabled,
    ),
    BindSpec::from_field(
        "active_checks_enabled",
        BindType::I8,
        Field::ActiveServiceChecksEnabled,
    ),
    BindSpec::from_field(
        "retain_status_information",
        BindType::I8,
        Field::RetainServiceStatusInformation,
    ),
    BindSpec::from_field(
        "retain_nonstatus_information",
        BindType::I8,
        Field::RetainServiceNonstatusInformation,
    ),
    BindSpec::from_field(
        "notifications_enabled",
        BindType::I8,
        Field::ServiceNotificationsEnabled,
    ),
    BindSpec::from_field("obsess_over_service", BindType::I8, Field::ObsessOverService),
    BindSpec::from_field(
        "failure_prediction_enabled",
        BindType::I8,
        Field::ServiceFailurePredictionEnabled,
    ),
    BindSpec::from_field("notes", BindType::ShortStr, Field::Notes),
    BindSpec::from_field("notes_url", BindType::ShortStr, Field::NotesUrl),
    BindSpec::from_field("action_url", BindType::ShortStr, Field::ActionUrl),
    BindSpec::from_field("icon_image", BindType::ShortStr, Field::IconImage),
    BindSpec::from_field("icon_image_alt", BindType::ShortStr, Field::IconImageAlt),
    BindSpec::from_field("importance", BindType::I32, Field::Importance),
];

const SERVICE_CONTACTGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("service_id", BindType::U32),
    BindSpec::col("contactgroup_object_id", BindType::U32),
];

const SERVICE_CONTACT_PARAMS: &[BindSpec] = &[
    BindSpec::col("service_id", BindType::U32),
    BindSpec::col("contact_object_id", BindType::U32),
];

const SERVICEGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("servicegroup_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("alias", BindType::ShortStr, Field::ServiceGroupAlias),
];

const SERVICEGROUP_MEMBER_PARAMS: &[BindSpec] = &[
    BindSpec::col("servicegroup_id", BindType::U32),
    BindSpec::col("service_object_id", BindType::U32),
];

const HOSTDEPENDENCY_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_object_id", BindType::U32),
    BindSpec::col("dependent_host_object_id", BindType::U32),
    BindSpec::col("timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("dependency_type", BindType::I8, Field::DependencyType),
    BindSpec::from_field("inherits_parent", BindType::I8, Field::InheritsParent),
    BindSpec::from_field("fail_on_up", BindType::I8, Field::FailOnUp),
    BindSpec::from_field("fail_on_down", BindType::I8, Field::FailOnDown),
    BindSpec::from_field("fail_on_unreachable", BindType::I8, Field::FailOnUnreachable),
];

const SERVICEDEPENDENCY_PARAMS: &[BindSpec] = &[
    BindSpec::col("service_object_id", BindType::U32),
    BindSpec::col("dependent_service_object_id", BindType::U32),
    BindSpec::col("timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("dependency_type", BindType::I8, Field::DependencyType),
    BindSpec::from_field("inherits_parent", BindType::I8, Field::InheritsParent),
    BindSpec::from_field("fail_on_ok", BindType::I8, Field::FailOnOk),
    BindSpec::from_field("fail_on_warning", BindType::I8, Field::FailOnWarning),
    BindSpec::from_field("fail_on_unknown", BindType::I8, Field::FailOnUnknown),
    BindSpec::from_field("fail_on_critical", BindType::I8, Field::FailOnCritical),
];

const HOSTESCALATION_PARAMS: &[BindSpec] = &[
    BindSpec::col("host_object_id", BindType::U32),
    BindSpec::col("timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("first_notification", BindType::I16, Field::FirstNotification),
    BindSpec::from_field("last_notification", BindType::I16, Field::LastNotification),
    BindSpec::from_field("notification_interval", BindType::F64, Field::NotificationInterval),
    BindSpec::from_field("escalate_on_recovery", BindType::I8, Field::EscalateOnRecovery),
    BindSpec::from_field("escalate_on_down", BindType::I8, Field::EscalateOnDown),
    BindSpec::from_field("escalate_on_unreachable", BindType::I8, Field::EscalateOnUnreachable),
];

const HOSTESCALATION_CONTACTGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("hostescalation_id", BindType::U32),
    BindSpec::col("contactgroup_object_id", BindType::U32),
];

const HOSTESCALATION_CONTACT_PARAMS: &[BindSpec] = &[
    BindSpec::col("hostescalation_id", BindType::U32),
    BindSpec::col("contact_object_id", BindType::U32),
];

const SERVICEESCALATION_PARAMS: &[BindSpec] = &[
    BindSpec::col("service_object_id", BindType::U32),
    BindSpec::col("timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("first_notification", BindType::I16, Field::FirstNotification),
    BindSpec::from_field("last_notification", BindType::I16, Field::LastNotification),
    BindSpec::from_field("notification_interval", BindType::F64, Field::NotificationInterval),
    BindSpec::from_field("escalate_on_recovery", BindType::I8, Field::EscalateOnRecovery),
    BindSpec::from_field("escalate_on_warning", BindType::I8, Field::EscalateOnWarning),
    BindSpec::from_field("escalate_on_unknown", BindType::I8, Field::EscalateOnUnknown),
    BindSpec::from_field("escalate_on_critical", BindType::I8, Field::EscalateOnCritical),
];

const SERVICEESCALATION_CONTACTGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("serviceescalation_id", BindType::U32),
    BindSpec::col("contactgroup_object_id", BindType::U32),
];

const SERVICEESCALATION_CONTACT_PARAMS: &[BindSpec] = &[
    BindSpec::col("serviceescalation_id", BindType::U32),
    BindSpec::col("contact_object_id", BindType::U32),
];

const COMMAND_PARAMS: &[BindSpec] = &[
    BindSpec::col("object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("command_line", BindType::ShortStr, Field::CommandLine),
];

const TIMEPERIOD_PARAMS: &[BindSpec] = &[
    BindSpec::col("timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("alias", BindType::ShortStr, Field::TimeperiodAlias),
];

const TIMEPERIOD_RANGE_PARAMS: &[BindSpec] = &[
    BindSpec::col("timeperiod_id", BindType::U32),
    BindSpec::col("day", BindType::I16),
    BindSpec::col("start_sec", BindType::U32),
    BindSpec::col("end_sec", BindType::U32),
];

const CONTACT_PARAMS: &[BindSpec] = &[
    BindSpec::col("contact_object_id", BindType::U32),
    BindSpec::col("host_timeperiod_object_id", BindType::U32),
    BindSpec::col("service_timeperiod_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("alias", BindType::ShortStr, Field::ContactAlias),
    BindSpec::from_field("email_address", BindType::ShortStr, Field::EmailAddress),
    BindSpec::from_field("pager_address", BindType::ShortStr, Field::PagerAddress),
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
    BindSpec::from_field("can_submit_commands", BindType::I8, Field::CanSubmitCommands),
    BindSpec::from_field("notify_service_recovery", BindType::I8, Field::NotifyServiceRecovery),
    BindSpec::from_field("notify_service_warning", BindType::I8, Field::NotifyServiceWarning),
    BindSpec::from_field("notify_service_unknown", BindType::I8, Field::NotifyServiceUnknown),
    BindSpec::from_field("notify_service_critical", BindType::I8, Field::NotifyServiceCritical),
    BindSpec::from_field("notify_service_flapping", BindType::I8, Field::NotifyServiceFlapping),
    BindSpec::from_field("notify_service_downtime", BindType::I8, Field::NotifyServiceDowntime),
    BindSpec::from_field("notify_host_recovery", BindType::I8, Field::NotifyHostRecovery),
    BindSpec::from_field("notify_host_down", BindType::I8, Field::NotifyHostDown),
    BindSpec::from_field("notify_host_unreachable", BindType::I8, Field::NotifyHostUnreachable),
    BindSpec::from_field("notify_host_flapping", BindType::I8, Field::NotifyHostFlapping),
    BindSpec::from_field("notify_host_downtime", BindType::I8, Field::NotifyHostDowntime),
    BindSpec::from_field("minimum_importance", BindType::I32, Field::MinimumImportance),
];

const CONTACT_ADDRESS_PARAMS: &[BindSpec] = &[
    BindSpec::col("contact_id", BindType::U32),
    BindSpec::col("address_number", BindType::I16),
    BindSpec::col("address", BindType::ShortStr),
];

const CONTACT_NOTIFICATIONCOMMAND_PARAMS: &[BindSpec] = &[
    BindSpec::col("contact_id", BindType::U32),
    BindSpec::col("notification_type", BindType::I8),
    BindSpec::col("command_object_id", BindType::U32),
    BindSpec::col("command_args", BindType::ShortStr),
];

const CONTACTGROUP_PARAMS: &[BindSpec] = &[
    BindSpec::col("contactgroup_object_id", BindType::U32),
    BindSpec::config_type("config_type"),
    BindSpec::from_field("alias", BindType::ShortStr, Field::ContactGroupAlias),
];

const CONTACTGROUP_MEMBER_PARAMS: &[BindSpec] = &[
    BindSpec::col("contactgroup_id", BindType::U32),
    BindSpec::col("contact_object_id", BindType::U32),
];

const CUSTOMVARIABLE_PARAMS: &[BindSpec] = &[
    BindSpec::col("object_id", BindType::U32),
    BindSpec::col("config_type", BindType::I8),
    BindSpec::col("has_been_modified", BindType::I8),
    BindSpec::col("varname", BindType::ShortStr),
    BindSpec::col("varvalue", BindType::ShortStr),
];

pub(crate) fn prepare(reg: &mut Registry, sql: &SqlBuilder) -> Result<()> {
    reg.prepare(StmtId::HandleHost, sql.upsert(Table::Hosts, HOST_PARAMS), HOST_PARAMS)?;
    reg.prepare(
        StmtId::SaveHostParent,
        sql.upsert(Table::HostParentHosts, HOST_PARENT_PARAMS),
        HOST_PARENT_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveHostContactGroup,
        sql.upsert(Table::HostContactGroups, HOST_CONTACTGROUP_PARAMS),
        HOST_CONTACTGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveHostContact,
        sql.upsert(Table::HostContacts, HOST_CONTACT_PARAMS),
        HOST_CONTACT_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleHostGroup,
        sql.upsert(Table::HostGroups, HOSTGROUP_PARAMS),
        HOSTGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveHostGroupMember,
        sql.upsert(Table::HostGroupMembers, HOSTGROUP_MEMBER_PARAMS),
        HOSTGROUP_MEMBER_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleService,
        sql.upsert(Table::Services, SERVICE_PARAMS),
        SERVICE_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveServiceContactGroup,
        sql.upsert(Table::ServiceContactGroups, SERVICE_CONTACTGROUP_PARAMS),
        SERVICE_CONTACTGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveServiceContact,
        sql.upsert(Table::ServiceContacts, SERVICE_CONTACT_PARAMS),
        SERVICE_CONTACT_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleServiceGroup,
        sql.upsert(Table::ServiceGroups, SERVICEGROUP_PARAMS),
        SERVICEGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveServiceGroupMember,
        sql.upsert(Table::ServiceGroupMembers, SERVICEGROUP_MEMBER_PARAMS),
        SERVICEGROUP_MEMBER_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleHostDependency,
        sql.upsert(Table::HostDependencies, HOSTDEPENDENCY_PARAMS),
        HOSTDEPENDENCY_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleServiceDependency,
        sql.upsert(Table::ServiceDependencies, SERVICEDEPENDENCY_PARAMS),
        SERVICEDEPENDENCY_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleHostEscalation,
        sql.upsert(Table::HostEscalations, HOSTESCALATION_PARAMS),
        HOSTESCALATION_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveHostEscalationContactGroup,
        sql.upsert(Table::HostEscalationContactGroups, HOSTESCALATION_CONTACTGROUP_PARAMS),
        HOSTESCALATION_CONTACTGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveHostEscalationContact,
        sql.upsert(Table::HostEscalationContacts, HOSTESCALATION_CONTACT_PARAMS),
        HOSTESCALATION_CONTACT_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleServiceEscalation,
        sql.upsert(Table::ServiceEscalations, SERVICEESCALATION_PARAMS),
        SERVICEESCALATION_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveServiceEscalationContactGroup,
        sql.upsert(
            Table::ServiceEscalationContactGroups,
            SERVICEESCALATION_CONTACTGROUP_PARAMS,
        ),
        SERVICEESCALATION_CONTACTGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveServiceEscalationContact,
        sql.upsert(Table::ServiceEscalationContacts, SERVICEESCALATION_CONTACT_PARAMS),
        SERVICEESCALATION_CONTACT_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleCommand,
        sql.upsert(Table::Commands, COMMAND_PARAMS),
        COMMAND_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleTimePeriod,
        sql.upsert(Table::TimePeriods, TIMEPERIOD_PARAMS),
        TIMEPERIOD_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveTimePeriodRange,
        sql.upsert(Table::TimePeriodTimeRanges, TIMEPERIOD_RANGE_PARAMS),
        TIMEPERIOD_RANGE_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleContact,
        sql.upsert(Table::Contacts, CONTACT_PARAMS),
        CONTACT_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveContactAddress,
        sql.upsert(Table::ContactAddresses, CONTACT_ADDRESS_PARAMS),
        CONTACT_ADDRESS_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveContactNotificationCommand,
        sql.upsert(Table::ContactNotificationCommands, CONTACT_NOTIFICATIONCOMMAND_PARAMS),
        CONTACT_NOTIFICATIONCOMMAND_PARAMS,
    )?;
    reg.prepare(
        StmtId::HandleContactGroup,
        sql.upsert(Table::ContactGroups, CONTACTGROUP_PARAMS),
        CONTACTGROUP_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveContactGroupMember,
        sql.upsert(Table::ContactGroupMembers, CONTACTGROUP_MEMBER_PARAMS),
        CONTACTGROUP_MEMBER_PARAMS,
    )?;
    reg.prepare(
        StmtId::SaveCustomVariable,
        sql.upsert(Table::CustomVariables, CUSTOMVARIABLE_PARAMS),
        CUSTOMVARIABLE_PARAMS,
    )?;
    Ok(())
}
