use std::collections::VecDeque;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use mon2db::{
    event::subtype, EventInput, EventKind, ExecOutcome, Executor, Field, MbufKind, ObjectKind,
    Result, Row, Session, Value,
};

/// Scripted executor: records every statement it sees, answers queries
/// from a queue of canned result sets, and hands out incrementing
/// insert ids.
#[derive(Default)]
struct MockExecutor {
    log: Vec<(String, Vec<Value>)>,
    select_responses: VecDeque<Vec<Row>>,
    next_insert_id: u64,
    fail_contains: Option<&'static str>,
}

#[async_trait]
impl Executor for MockExecutor {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecOutcome> {
        self.log.push((sql.to_owned(), params.to_vec()));
        if let Some(needle) = self.fail_contains {
            if sql.contains(needle) {
                anyhow::bail!("injected failure for {needle}");
            }
        }
        self.next_insert_id += 1;
        Ok(ExecOutcome { affected_rows: 1, last_insert_id: self.next_insert_id })
    }

    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.log.push((sql.to_owned(), params.to_vec()));
        Ok(self.select_responses.pop_front().unwrap_or_default())
    }
}

fn session() -> Session<MockExecutor> {
    match Session::new(MockExecutor::default(), "nagios_", 1) {
        Ok(s) => s,
        Err(err) => panic!("session setup failed: {err}"),
    }
}

fn standard(input: &mut EventInput, kind_code: i32, tstamp: &str) {
    input.set(Field::Type, kind_code.to_string());
    input.set(Field::Flags, "0");
    input.set(Field::Attributes, "0");
    input.set(Field::Timestamp, tstamp);
}

#[tokio::test]
async fn resolve_creates_once_then_hits_cache() {
    let mut s = session();

    let id = s.resolve_or_create(ObjectKind::Host, Some("web01"), None).await.unwrap();
    assert_eq!(id, 1);
    // One miss select, one insert.
    assert_eq!(s.executor().log.len(), 2);
    assert!(s.executor().log[1].0.contains("INSERT INTO nagios_objects"));

    let id = s.resolve_or_create(ObjectKind::Host, Some("web01"), None).await.unwrap();
    assert_eq!(id, 1);
    assert_eq!(s.executor().log.len(), 2, "second resolve must be served from cache");
}

#[tokio::test]
async fn resolve_empty_name_is_id_zero_without_io() {
    let mut s = session();
    assert_eq!(s.resolve_or_create(ObjectKind::Host, Some(""), None).await.unwrap(), 0);
    assert_eq!(s.resolve_or_create(ObjectKind::Host, None, None).await.unwrap(), 0);
    assert!(s.executor().log.is_empty());
}

#[tokio::test]
async fn resolve_prefers_existing_row_over_insert() {
    let mut s = session();
    s.executor_mut().select_responses.push_back(vec![vec![Value::U32(77)]]);

    let id = s
        .resolve_or_create(ObjectKind::Service, Some("web01"), Some("PING"))
        .await
        .unwrap();
    assert_eq!(id, 77);
    assert_eq!(s.executor().log.len(), 1, "a matching row must not trigger an insert");
    // The two-name lookup compares both names.
    let (sql, params) = &s.executor().log[0];
    assert!(sql.contains("BINARY name1=?") && sql.contains("BINARY name2=?"));
    assert_eq!(params.len(), 3);
}

#[tokio::test]
async fn precheck_events_are_dropped() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, subtype::SERVICECHECK_ASYNC_PRECHECK, "1200.0");
    input.set(Field::Host, "web01");
    input.set(Field::Service, "PING");
    s.dispatch(EventKind::ServiceCheckData, &input).await.unwrap();

    let mut input = EventInput::new();
    standard(&mut input, subtype::HOSTCHECK_SYNC_PRECHECK, "1200.0");
    input.set(Field::Host, "web01");
    s.dispatch(EventKind::HostCheckData, &input).await.unwrap();

    assert!(s.executor().log.is_empty());
}

#[tokio::test]
async fn processed_service_check_binds_object_and_window() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, subtype::SERVICECHECK_PROCESSED, "1200.500");
    input.set(Field::Host, "web01");
    input.set(Field::Service, "PING");
    input.set(Field::CommandName, "check_ping");
    input.set(Field::StartTime, "1200.100");
    input.set(Field::EndTime, "1201.200");
    s.dispatch(EventKind::ServiceCheckData, &input).await.unwrap();

    let (sql, params) = s.executor().log.last().unwrap();
    assert!(sql.contains("nagios_servicechecks"));
    assert!(sql.contains("ON DUPLICATE KEY UPDATE"));
    // Service object was created first (id 1), command second (id 2).
    assert_eq!(params[0], Value::U32(1));
    assert_eq!(params[1], Value::U32(2));
    assert_eq!(params[2], Value::U32(1200));
    assert_eq!(params[3], Value::I32(100));
    assert_eq!(params[4], Value::U32(1201));
    assert_eq!(params[5], Value::I32(200));
}

#[tokio::test]
async fn stale_status_events_are_skipped() {
    let mut s = session();
    s.set_latest_realtime_time(2000);

    let mut input = EventInput::new();
    standard(&mut input, 0, "1500.0");
    input.set(Field::Host, "web01");
    s.dispatch(EventKind::HostStatusData, &input).await.unwrap();

    assert!(s.executor().log.is_empty());
}

#[tokio::test]
async fn host_status_chains_custom_variable_status() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::Host, "web01");
    input.set(Field::HostCheckPeriod, "24x7");
    input.push_line(MbufKind::CustomVariable, "_SNMPCOMMUNITY:1:public");
    s.dispatch(EventKind::HostStatusData, &input).await.unwrap();

    let log = &s.executor().log;
    let (status_sql, status_params) =
        log.iter().find(|(sql, _)| sql.contains("nagios_hoststatus")).unwrap();
    assert!(status_sql.contains("ON DUPLICATE KEY UPDATE"));
    assert_eq!(status_params[0], Value::U32(1), "host object id");
    assert_eq!(status_params[1], Value::U32(3000), "status update time");
    assert_eq!(status_params[2], Value::U32(2), "check timeperiod object id");

    let (_, cv_params) = log
        .iter()
        .find(|(sql, _)| sql.contains("nagios_customvariablestatus"))
        .unwrap();
    assert_eq!(
        &cv_params[..],
        &[
            Value::U32(1),
            Value::U32(3000),
            Value::I8(1),
            Value::Str("_SNMPCOMMUNITY".into()),
            Value::Str("public".into()),
        ]
    );

    // A replay older than the stored status must now be ignored.
    let mut replay = EventInput::new();
    standard(&mut replay, 0, "2999.0");
    replay.set(Field::Host, "web01");
    let before = s.executor().log.len();
    s.dispatch(EventKind::HostStatusData, &replay).await.unwrap();
    assert_eq!(s.executor().log.len(), before);
}

#[tokio::test]
async fn stale_comment_lands_in_history_only() {
    let mut s = session();
    s.set_latest_realtime_time(2000);

    let mut input = EventInput::new();
    standard(&mut input, subtype::COMMENT_ADD, "1500.0");
    input.set(Field::Host, "web01");
    input.set(Field::CommentTime, "1500");
    input.set(Field::CommentId, "7");
    s.dispatch(EventKind::CommentData, &input).await.unwrap();

    let log = &s.executor().log;
    assert!(
        log.iter().any(|(sql, _)| sql.contains("nagios_commenthistory")),
        "history keeps stale comments"
    );
    assert!(
        !log.iter().any(|(sql, _)| sql.contains("INSERT INTO nagios_comments ")),
        "stale comment must not touch the live table"
    );

    let mut fresh = EventInput::new();
    standard(&mut fresh, subtype::COMMENT_ADD, "2500.0");
    fresh.set(Field::Host, "web01");
    s.dispatch(EventKind::CommentData, &fresh).await.unwrap();
    assert!(s
        .executor()
        .log
        .iter()
        .any(|(sql, _)| sql.contains("INSERT INTO nagios_comments ")));
}

#[tokio::test]
async fn stale_downtime_lands_in_history_only() {
    let mut s = session();
    s.set_latest_realtime_time(2000);

    let mut input = EventInput::new();
    standard(&mut input, subtype::DOWNTIME_ADD, "1500.0");
    input.set(Field::Host, "web01");
    input.set(Field::DowntimeType, "2");
    input.set(Field::EntryTime, "1400");
    input.set(Field::StartTime, "1600");
    input.set(Field::EndTime, "1700");
    s.dispatch(EventKind::DowntimeData, &input).await.unwrap();

    let mut start = EventInput::new();
    standard(&mut start, subtype::DOWNTIME_START, "1600.0");
    start.set(Field::Host, "web01");
    start.set(Field::DowntimeType, "2");
    start.set(Field::EntryTime, "1400");
    start.set(Field::StartTime, "1600");
    start.set(Field::EndTime, "1700");
    s.dispatch(EventKind::DowntimeData, &start).await.unwrap();

    let log = &s.executor().log;
    assert!(log.iter().any(|(sql, _)| sql.contains("nagios_downtimehistory")));
    assert!(
        !log.iter().any(|(sql, _)| sql.contains("nagios_scheduleddowntime")),
        "stale downtime must not touch the live table"
    );

    let mut fresh = EventInput::new();
    standard(&mut fresh, subtype::DOWNTIME_ADD, "2500.0");
    fresh.set(Field::Host, "web01");
    fresh.set(Field::DowntimeType, "2");
    s.dispatch(EventKind::DowntimeData, &fresh).await.unwrap();
    assert!(s
        .executor()
        .log
        .iter()
        .any(|(sql, _)| sql.contains("nagios_scheduleddowntime")));
}

#[tokio::test]
async fn retained_config_dump_marks_definitions() {
    let mut s = session();

    let mut dump = EventInput::new();
    dump.set(Field::ConfigDumpType, "RETAINED");
    s.dispatch(EventKind::ConfigDumpStart, &dump).await.unwrap();

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::CommandName, "check_ping");
    input.set(Field::CommandLine, "$USER1$/check_ping -H $HOSTADDRESS$");
    s.dispatch(EventKind::CommandDefinition, &input).await.unwrap();

    let (sql, params) = s.executor().log.last().unwrap();
    assert!(sql.contains("nagios_commands"));
    assert_eq!(params[1], Value::I8(1), "retained dump stores config_type 1");
}

#[tokio::test]
async fn timed_event_removal_deletes_by_schedule_key() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, subtype::TIMEDEVENT_REMOVE, "3000.0");
    input.set(Field::EventType, subtype::EVENT_HOST_CHECK.to_string());
    input.set(Field::Host, "web01");
    input.set(Field::RunTime, "3600");
    s.dispatch(EventKind::TimedEventData, &input).await.unwrap();

    let (sql, params) = s.executor().log.last().unwrap();
    assert!(sql.starts_with("DELETE FROM nagios_timedeventqueue"));
    assert!(sql.contains("scheduled_time=FROM_UNIXTIME(?)"));
    assert_eq!(
        &params[..],
        &[Value::I16(1), Value::U32(3600), Value::U32(1)]
    );
}

#[tokio::test]
async fn notifications_chain_insert_ids() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::Host, "web01");
    input.set(Field::NotificationType, "0");
    input.set(Field::StartTime, "3000.0");
    input.set(Field::EndTime, "3000.0");
    s.dispatch(EventKind::NotificationData, &input).await.unwrap();
    // Object insert took id 1, the notification row took id 2.

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::ContactName, "admin");
    input.set(Field::StartTime, "3000.0");
    input.set(Field::EndTime, "3000.0");
    s.dispatch(EventKind::ContactNotificationData, &input).await.unwrap();

    let (sql, params) = s.executor().log.last().unwrap();
    assert!(sql.contains("nagios_contactnotifications"));
    assert_eq!(params[0], Value::U32(2), "links back to the notification row");
    assert_eq!(params[1], Value::U32(3), "contact object id");
}

#[tokio::test]
async fn prelaunch_clears_realtime_tables() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, subtype::PROCESS_PRELAUNCH, "3000.0");
    input.set(Field::ProgramName, "Nagios");
    input.set(Field::ProgramVersion, "4.4.6");
    input.set(Field::ProgramDate, "2020-04-28");
    input.set(Field::ProcessId, "4242");
    s.dispatch(EventKind::ProcessData, &input).await.unwrap();

    let log = &s.executor().log;
    assert!(log[0].0.contains("nagios_processevents"));
    assert!(log[1].0.contains("SET is_active=0"), "objects go inactive before replay");
    let deletes: Vec<&str> = log[2..].iter().map(|(sql, _)| sql.as_str()).collect();
    assert_eq!(deletes.len(), 9);
    for (sql, table) in deletes.iter().zip([
        "programstatus",
        "hoststatus",
        "servicestatus",
        "contactstatus",
        "timedeventqueue",
        "comments",
        "scheduleddowntime",
        "runtimevariables",
        "customvariablestatus",
    ]) {
        assert_eq!(*sql, format!("DELETE FROM nagios_{table} WHERE instance_id=1"));
    }
}

#[tokio::test]
async fn host_definition_saves_relations_and_custom_variables() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::HostName, "web01");
    input.set(Field::HostCheckCommand, "check_ping!100,20%");
    input.set(Field::HostCheckPeriod, "24x7");
    input.set(Field::HostNotificationPeriod, "workhours");
    input.push_line(MbufKind::ParentHost, "gateway");
    input.push_line(MbufKind::ContactGroup, "admins");
    input.push_line(MbufKind::Contact, "root");
    input.push_line(MbufKind::CustomVariable, "_RACK:0:b12");
    s.dispatch(EventKind::HostDefinition, &input).await.unwrap();

    let log = &s.executor().log;
    let (host_sql, host_params) =
        log.iter().find(|(sql, _)| sql.contains("nagios_hosts ")).unwrap();
    assert!(host_sql.contains("ON DUPLICATE KEY UPDATE"));
    // Command resolve ran first, so check_ping is object 1 and the
    // host object is 2.
    assert_eq!(host_params[0], Value::U32(2));
    assert_eq!(host_params[1], Value::U32(1));
    assert_eq!(host_params[2], Value::Str("100,20%".into()));

    for table in [
        "nagios_host_parenthosts",
        "nagios_host_contactgroups",
        "nagios_host_contacts",
        "nagios_customvariables",
    ] {
        assert!(
            log.iter().any(|(sql, _)| sql.contains(table)),
            "missing {table} save"
        );
    }
    assert!(
        log.iter().any(|(sql, _)| sql.contains("is_active=1")),
        "definition must mark the object active"
    );
}

#[tokio::test]
async fn preloaded_cache_serves_lookups_without_io() {
    let mut s = session();
    s.executor_mut().select_responses.push_back(vec![
        vec![Value::U32(11), Value::I8(1), Value::Str("web01".into()), Value::Null],
        vec![
            Value::U32(12),
            Value::I8(2),
            Value::Str("web01".into()),
            Value::Str("PING".into()),
        ],
        // Rows with an empty first name never enter the cache.
        vec![Value::U32(13), Value::I8(1), Value::Str("".into()), Value::Null],
    ]);
    s.start(5000).await.unwrap();
    let after_start = s.executor().log.len();

    assert_eq!(s.resolve_or_create(ObjectKind::Host, Some("web01"), None).await.unwrap(), 11);
    assert_eq!(
        s.resolve_or_create(ObjectKind::Service, Some("web01"), Some("PING"))
            .await
            .unwrap(),
        12
    );
    assert_eq!(s.executor().log.len(), after_start);
    assert_eq!(s.cache().len(), 2);
}

#[tokio::test]
async fn startup_sweep_drops_stale_queue_entries() {
    let mut s = session();
    s.start(5000).await.unwrap();

    let (sql, params) = s.executor().log.last().unwrap();
    assert!(sql.starts_with("DELETE FROM nagios_timedeventqueue"));
    assert!(sql.contains("scheduled_time<FROM_UNIXTIME(?)"));
    assert_eq!(&params[..], &[Value::U32(5000)]);
}

#[tokio::test]
async fn executed_timed_event_sweeps_behind_itself() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, subtype::TIMEDEVENT_EXECUTE, "3000.0");
    input.set(Field::EventType, subtype::EVENT_HOST_CHECK.to_string());
    input.set(Field::Host, "web01");
    input.set(Field::RunTime, "2400");
    s.dispatch(EventKind::TimedEventData, &input).await.unwrap();

    let (sql, params) = s.executor().log.last().unwrap();
    assert!(sql.contains("scheduled_time<FROM_UNIXTIME(?)"));
    assert_eq!(&params[..], &[Value::U32(2400)]);
}

#[tokio::test]
async fn definition_cascade_continues_past_row_failures() {
    let mut s = session();
    s.executor_mut().fail_contains = Some("nagios_host_contactgroups");

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::HostName, "web01");
    input.push_line(MbufKind::ContactGroup, "admins");
    input.push_line(MbufKind::Contact, "root");
    let err = s.dispatch(EventKind::HostDefinition, &input).await;
    assert!(err.is_err(), "a failed relation row must surface an error");

    // The later contact loop still ran to completion.
    assert!(s
        .executor()
        .log
        .iter()
        .any(|(sql, _)| sql.contains("nagios_host_contacts ")));
}

#[tokio::test]
async fn service_group_members_need_both_names() {
    let mut s = session();

    let mut input = EventInput::new();
    standard(&mut input, 0, "3000.0");
    input.set(Field::ServiceGroupName, "web-services");
    input.push_line(MbufKind::ServiceGroupMember, "web01;PING");
    input.push_line(MbufKind::ServiceGroupMember, "orphan-host");
    s.dispatch(EventKind::ServiceGroupDefinition, &input).await.unwrap();

    let member_rows: Vec<_> = s
        .executor()
        .log
        .iter()
        .filter(|(sql, _)| sql.contains("nagios_servicegroup_members"))
        .collect();
    assert_eq!(member_rows.len(), 1, "a member without a service name is skipped");
}
