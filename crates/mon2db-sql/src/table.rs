/// Schema tables the persistence layer writes. Base names are combined
/// with the configured table prefix at template-print time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Objects,
    LogEntries,
    ProcessEvents,
    ProgramStatus,
    TimedEvents,
    TimedEventQueue,
    SystemCommands,
    EventHandlers,
    Notifications,
    ContactNotifications,
    ContactNotificationMethods,
    ServiceChecks,
    HostChecks,
    Comments,
    CommentHistory,
    ScheduledDowntime,
    DowntimeHistory,
    FlappingHistory,
    HostStatus,
    ServiceStatus,
    ContactStatus,
    ExternalCommands,
    Acknowledgements,
    StateHistory,
    ConfigFiles,
    ConfigFileVariables,
    RuntimeVariables,
    CustomVariables,
    CustomVariableStatus,
    Hosts,
    HostParentHosts,
    HostContactGroups,
    HostContacts,
    HostGroups,
    HostGroupMembers,
    Services,
    ServiceContactGroups,
    ServiceContacts,
    ServiceGroups,
    ServiceGroupMembers,
    HostDependencies,
    ServiceDependencies,
    HostEscalations,
    HostEscalationContactGroups,
    HostEscalationContacts,
    ServiceEscalations,
    ServiceEscalationContactGroups,
    ServiceEscalationContacts,
    Commands,
    TimePeriods,
    TimePeriodTimeRanges,
    Contacts,
    ContactAddresses,
    ContactNotificationCommands,
    ContactGroups,
    ContactGroupMembers,
}

impl Table {
    /// Base table name without the schema prefix.
    pub fn base_name(self) -> &'static str {
        match self {
            Table::Objects => "objects",
            Table::LogEntries => "logentries",
            Table::ProcessEvents => "processevents",
            Table::ProgramStatus => "programstatus",
            Table::TimedEvents => "timedevents",
            Table::TimedEventQueue => "timedeventqueue",
            Table::SystemCommands => "systemcommands",
            Table::EventHandlers => "eventhandlers",
            Table::Notifications => "notifications",
            Table::ContactNotifications => "contactnotifications",
            Table::ContactNotificationMethods => "contactnotificationmethods",
            Table::ServiceChecks => "servicechecks",
            Table::HostChecks => "hostchecks",
            Table::Comments => "comments",
            Table::CommentHistory => "commenthistory",
            Table::ScheduledDowntime => "scheduleddowntime",
            Table::DowntimeHistory => "downtimehistory",
            Table::FlappingHistory => "flappinghistory",
            Table::HostStatus => "hoststatus",
            Table::ServiceStatus => "servicestatus",
            Table::ContactStatus => "contactstatus",
            Table::ExternalCommands => "externalcommands",
            Table::Acknowledgements => "acknowledgements",
            Table::StateHistory => "statehistory",
            Table::ConfigFiles => "configfiles",
            Table::ConfigFileVariables => "configfilevariables",
            Table::RuntimeVariables => "runtimevariables",
            Table::CustomVariables => "customvariables",
            Table::CustomVariableStatus => "customvariablestatus",
            Table::Hosts => "hosts",
            Table::HostParentHosts => "host_parenthosts",
            Table::HostContactGroups => "host_contactgroups",
            Table::HostContacts => "host_contacts",
            Table::HostGroups => "hostgroups",
            Table::HostGroupMembers => "hostgroup_members",
            Table::Services => "services",
            Table::ServiceContactGroups => "service_contactgroups",
            Table::ServiceContacts => "service_contacts",
            Table::ServiceGroups => "servicegroups",
            Table::ServiceGroupMembers => "servicegroup_members",
            Table::HostDependencies => "hostdependencies",
            Table::ServiceDependencies => "servicedependencies",
            Table::HostEscalations => "hostescalations",
            Table::HostEscalationContactGroups => "hostescalation_contactgroups",
            Table::HostEscalationContacts => "hostescalation_contacts",
            Table::ServiceEscalations => "serviceescalations",
            Table::ServiceEscalationContactGroups => "serviceescalation_contactgroups",
            Table::ServiceEscalationContacts => "serviceescalation_contacts",
            Table::Commands => "commands",
            Table::TimePeriods => "timeperiods",
            Table::TimePeriodTimeRanges => "timeperiod_timeranges",
            Table::Contacts => "contacts",
            Table::ContactAddresses => "contact_addresses",
            Table::ContactNotificationCommands => "contact_notificationcommands",
            Table::ContactGroups => "contactgroups",
            Table::ContactGroupMembers => "contactgroup_members",
        }
    }
}
