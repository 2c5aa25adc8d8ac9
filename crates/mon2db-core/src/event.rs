//! The flattened event record consumed from the broker: a flat array of
//! optional strings indexed by [`Field`], plus named multi-line buffers
//! ([`MbufKind`]) for repeated sub-records.

/// One dispatchable protocol data block.
///
/// Kinds marked "ignored" dispatch to no-ops; the upstream broker emits
/// them but the relational schema has no use for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    LogEntry,
    ProcessData,
    TimedEventData,
    LogData,
    SystemCommandData,
    EventHandlerData,
    NotificationData,
    ContactNotificationData,
    ContactNotificationMethodData,
    ServiceCheckData,
    HostCheckData,
    CommentData,
    DowntimeData,
    FlappingData,
    ProgramStatusData,
    HostStatusData,
    ServiceStatusData,
    ContactStatusData,
    /// Ignored
    AdaptiveProgramData,
    /// Ignored
    AdaptiveHostData,
    /// Ignored
    AdaptiveServiceData,
    /// Ignored
    AdaptiveContactData,
    ExternalCommandData,
    /// Ignored
    AggregatedStatusData,
    /// Ignored
    RetentionData,
    AcknowledgementData,
    StateChangeData,
    MainConfigFileVariables,
    ResourceConfigFileVariables,
    /// Ignored
    ConfigVariables,
    RuntimeVariables,
    ConfigDumpStart,
    /// Ignored
    ConfigDumpEnd,
    HostDefinition,
    HostGroupDefinition,
    ServiceDefinition,
    ServiceGroupDefinition,
    HostDependencyDefinition,
    ServiceDependencyDefinition,
    HostEscalationDefinition,
    ServiceEscalationDefinition,
    CommandDefinition,
    TimePeriodDefinition,
    ContactDefinition,
    ContactGroupDefinition,
}

/// Event subtype codes carried in the standard `Type` field. These come
/// from the upstream broker protocol and are opaque beyond equality.
pub mod subtype {
    pub const PROCESS_START: i32 = 100;
    pub const PROCESS_DAEMONIZE: i32 = 101;
    pub const PROCESS_RESTART: i32 = 102;
    pub const PROCESS_SHUTDOWN: i32 = 103;
    pub const PROCESS_PRELAUNCH: i32 = 104;

    pub const TIMEDEVENT_ADD: i32 = 200;
    pub const TIMEDEVENT_REMOVE: i32 = 201;
    pub const TIMEDEVENT_EXECUTE: i32 = 202;

    /// Timed event class code for service checks, carried in the
    /// timed-event `EventType` field (distinct from the subtype).
    pub const EVENT_SERVICE_CHECK: i32 = 0;
    /// Timed event class code for host checks.
    pub const EVENT_HOST_CHECK: i32 = 1;

    pub const SERVICECHECK_INITIATE: i32 = 700;
    pub const SERVICECHECK_ASYNC_PRECHECK: i32 = 701;
    pub const SERVICECHECK_PROCESSED: i32 = 704;

    pub const HOSTCHECK_INITIATE: i32 = 800;
    pub const HOSTCHECK_RAW_START: i32 = 801;
    pub const HOSTCHECK_RAW_END: i32 = 802;
    pub const HOSTCHECK_ASYNC_PRECHECK: i32 = 803;
    pub const HOSTCHECK_SYNC_PRECHECK: i32 = 804;

    pub const COMMENT_ADD: i32 = 900;
    pub const COMMENT_DELETE: i32 = 901;
    pub const COMMENT_LOAD: i32 = 902;

    pub const DOWNTIME_ADD: i32 = 1100;
    pub const DOWNTIME_DELETE: i32 = 1101;
    pub const DOWNTIME_LOAD: i32 = 1102;
    pub const DOWNTIME_START: i32 = 1103;
    pub const DOWNTIME_STOP: i32 = 1104;

    pub const EXTERNALCOMMAND_START: i32 = 1600;

    pub const STATECHANGE_END: i32 = 1801;

    /// Acknowledgement object class: host.
    pub const ACKNOWLEDGEMENT_HOST: i32 = 0;
    /// Acknowledgement object class: service.
    pub const ACKNOWLEDGEMENT_SERVICE: i32 = 1;

    /// Notification command class: host notifications.
    pub const HOST_NOTIFICATION: i8 = 0;
    /// Notification command class: service notifications.
    pub const SERVICE_NOTIFICATION: i8 = 1;

    /// State change object class: host.
    pub const STATECHANGE_HOST: i32 = 0;
    /// State change object class: service.
    pub const STATECHANGE_SERVICE: i32 = 1;
}

/// Marker value in the config-dump-start event naming a retained
/// (state-retention) dump rather than an original config dump.
pub const CONFIGDUMP_RETAINED: &str = "RETAINED";

/// Fixed field-id enumeration for the flattened event record.
///
/// Only fields the handlers or binding descriptors reference are listed;
/// the wire protocol defines more, which the decoder simply never maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    // Standard fields present on nearly every event
    Type,
    Flags,
    Attributes,
    Timestamp,

    // Common check/status/notification fields
    Host,
    Service,
    CommandName,
    CommandArgs,
    CommandLine,
    CommandString,
    StartTime,
    EndTime,
    EntryTime,
    CheckType,
    CurrentCheckAttempt,
    MaxCheckAttempts,
    State,
    StateType,
    Timeout,
    EarlyTimeout,
    ExecutionTime,
    Latency,
    ReturnCode,
    Output,
    LongOutput,
    Perfdata,

    // Status fields
    CurrentState,
    HasBeenChecked,
    ShouldBeScheduled,
    LastHostCheck,
    NextHostCheck,
    LastServiceCheck,
    NextServiceCheck,
    LastStateChange,
    LastHardStateChange,
    LastHardState,
    LastTimeUp,
    LastTimeDown,
    LastTimeUnreachable,
    LastTimeOk,
    LastTimeWarning,
    LastTimeUnknown,
    LastTimeCritical,
    LastHostNotification,
    NextHostNotification,
    LastServiceNotification,
    NextServiceNotification,
    NoMoreNotifications,
    NotificationsEnabled,
    ProblemHasBeenAcknowledged,
    AcknowledgementType,
    CurrentNotificationNumber,
    PassiveHostChecksEnabled,
    ActiveHostChecksEnabled,
    PassiveServiceChecksEnabled,
    ActiveServiceChecksEnabled,
    EventHandlerEnabled,
    FlapDetectionEnabled,
    IsFlapping,
    PercentStateChange,
    ScheduledDowntimeDepth,
    FailurePredictionEnabled,
    ProcessPerformanceData,
    ObsessOverHost,
    ObsessOverService,
    ModifiedHostAttributes,
    ModifiedServiceAttributes,
    ModifiedContactAttributes,
    EventHandler,
    EventHandlerType,
    CheckCommand,
    NormalCheckInterval,
    RetryCheckInterval,

    // Program status / process fields
    ProgramName,
    ProgramVersion,
    ProgramDate,
    ProcessId,
    DaemonMode,
    ProgramStartTime,
    LastCommandCheck,
    LastLogRotation,
    EventHandlersEnabled,
    ObsessOverHosts,
    ObsessOverServices,
    GlobalHostEventHandler,
    GlobalServiceEventHandler,

    // Timed events
    EventType,
    Recurring,
    RunTime,

    // Log entries
    LogEntry,
    LogEntryTime,
    LogEntryType,

    // Notifications
    NotificationType,
    NotificationReason,
    ContactsNotified,
    Escalated,
    AckAuthor,
    AckData,

    // Comments
    CommentType,
    EntryType,
    AuthorName,
    Comment,
    Persistent,
    Source,
    Expires,
    ExpirationTime,
    CommentTime,
    CommentId,

    // Downtime
    DowntimeType,
    Fixed,
    Duration,
    TriggeredBy,
    DowntimeId,

    // Flapping
    FlappingType,
    LowThreshold,
    HighThreshold,

    // External commands / acknowledgements / state changes
    CommandType,
    StickyAcknowledgement,
    PersistentComment,
    NotifyContacts,
    StateChangeType,
    StateChange,
    LastState,

    // Config files / dumps
    ConfigFileName,
    ConfigDumpType,

    // Host definitions
    HostName,
    DisplayName,
    HostAlias,
    HostAddress,
    HostCheckCommand,
    HostEventHandler,
    HostCheckPeriod,
    HostNotificationPeriod,
    HostFailurePredictionOptions,
    HostCheckInterval,
    HostRetryInterval,
    HostMaxCheckAttempts,
    FirstNotificationDelay,
    HostNotificationInterval,
    NotifyHostDown,
    NotifyHostUnreachable,
    NotifyHostRecovery,
    NotifyHostFlapping,
    NotifyHostDowntime,
    StalkHostOnUp,
    StalkHostOnDown,
    StalkHostOnUnreachable,
    HostFlapDetectionEnabled,
    FlapDetectionOnUp,
    FlapDetectionOnDown,
    FlapDetectionOnUnreachable,
    LowHostFlapThreshold,
    HighHostFlapThreshold,
    ProcessHostPerformanceData,
    HostFreshnessChecksEnabled,
    HostFreshnessThreshold,
    HostEventHandlerEnabled,
    RetainHostStatusInformation,
    RetainHostNonstatusInformation,
    HostNotificationsEnabled,
    HostFailurePredictionEnabled,
    Notes,
    NotesUrl,
    ActionUrl,
    IconImage,
    IconImageAlt,
    VrmlImage,
    StatusmapImage,
    Have2dCoords,
    X2d,
    Y2d,
    Have3dCoords,
    X3d,
    Y3d,
    Z3d,
    Importance,

    // Service definitions
    ServiceDescription,
    ServiceCheckCommand,
    ServiceEventHandler,
    ServiceCheckPeriod,
    ServiceNotificationPeriod,
    ServiceFailurePredictionOptions,
    ServiceCheckInterval,
    ServiceRetryInterval,
    MaxServiceCheckAttempts,
    ServiceNotificationInterval,
    NotifyServiceWarning,
    NotifyServiceUnknown,
    NotifyServiceCritical,
    NotifyServiceRecovery,
    NotifyServiceFlapping,
    NotifyServiceDowntime,
    StalkServiceOnOk,
    StalkServiceOnWarning,
    StalkServiceOnUnknown,
    StalkServiceOnCritical,
    ServiceIsVolatile,
    ServiceFlapDetectionEnabled,
    FlapDetectionOnOk,
    FlapDetectionOnWarning,
    FlapDetectionOnUnknown,
    FlapDetectionOnCritical,
    LowServiceFlapThreshold,
    HighServiceFlapThreshold,
    ProcessServicePerformanceData,
    ServiceFreshnessChecksEnabled,
    ServiceFreshnessThreshold,
    ServiceEventHandlerEnabled,
    RetainServiceStatusInformation,
    RetainServiceNonstatusInformation,
    ServiceNotificationsEnabled,
    ServiceFailurePredictionEnabled,

    // Groups, dependencies, escalations
    HostGroupName,
    HostGroupAlias,
    ServiceGroupName,
    ServiceGroupAlias,
    DependentHostName,
    DependentServiceDescription,
    DependencyPeriod,
    DependencyType,
    InheritsParent,
    FailOnUp,
    FailOnDown,
    FailOnUnreachable,
    FailOnOk,
    FailOnWarning,
    FailOnUnknown,
    FailOnCritical,
    EscalationPeriod,
    FirstNotification,
    LastNotification,
    NotificationInterval,
    EscalateOnRecovery,
    EscalateOnDown,
    EscalateOnUnreachable,
    EscalateOnWarning,
    EscalateOnUnknown,
    EscalateOnCritical,

    // Time periods, contacts, contact groups
    TimeperiodName,
    TimeperiodAlias,
    ContactName,
    ContactAlias,
    EmailAddress,
    PagerAddress,
    CanSubmitCommands,
    MinimumImportance,
    ContactGroupName,
    ContactGroupAlias,
}

impl Field {
    /// Number of field slots in an event record.
    pub const COUNT: usize = Field::ContactGroupAlias as usize + 1;
}

/// Multi-line buffer names. Each buffer is a list of raw lines in a
/// kind-specific mini-format (`name`, `var=val`, `name:value`,
/// `day:start-end`, `name!args`, `name:modified:value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MbufKind {
    ContactGroup,
    Contact,
    ParentHost,
    ParentService,
    ConfigFileVariable,
    RuntimeVariable,
    CustomVariable,
    HostGroupMember,
    ServiceGroupMember,
    ContactGroupMember,
    TimeRange,
    ContactAddress,
    HostNotificationCommand,
    ServiceNotificationCommand,
}

impl MbufKind {
    pub const COUNT: usize = MbufKind::ServiceNotificationCommand as usize + 1;
}

/// One decoded event record: the flat field array plus multi-line
/// buffers. The persistence layer treats this as read-only input.
#[derive(Debug)]
pub struct EventInput {
    fields: Vec<Option<String>>,
    mbufs: Vec<Vec<String>>,
}

impl EventInput {
    pub fn new() -> EventInput {
        EventInput {
            fields: vec![None; Field::COUNT],
            mbufs: vec![Vec::new(); MbufKind::COUNT],
        }
    }

    /// Sets a field value, replacing any previous value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> &mut EventInput {
        self.fields[field as usize] = Some(value.into());
        self
    }

    /// Returns the raw field value, or `None` if the decoder never saw it.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields[field as usize].as_deref()
    }

    /// Appends a raw line to a multi-line buffer.
    pub fn push_line(&mut self, kind: MbufKind, line: impl Into<String>) -> &mut EventInput {
        self.mbufs[kind as usize].push(line.into());
        self
    }

    /// Returns the lines of a multi-line buffer, possibly empty.
    pub fn lines(&self, kind: MbufKind) -> &[String] {
        &self.mbufs[kind as usize]
    }
}

impl Default for EventInput {
    fn default() -> EventInput {
        EventInput::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_slots() {
        let mut input = EventInput::new();
        assert_eq!(input.get(Field::Host), None);

        input.set(Field::Host, "web01");
        input.set(Field::Host, "web02");
        assert_eq!(input.get(Field::Host), Some("web02"));
        assert_eq!(input.get(Field::Service), None);
    }

    #[test]
    fn mbuf_lines() {
        let mut input = EventInput::new();
        assert!(input.lines(MbufKind::Contact).is_empty());

        input.push_line(MbufKind::Contact, "jdoe");
        input.push_line(MbufKind::Contact, "ops");
        assert_eq!(input.lines(MbufKind::Contact), ["jdoe", "ops"]);
        assert!(input.lines(MbufKind::ContactGroup).is_empty());
    }
}
