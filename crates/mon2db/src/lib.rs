//! Persistence layer for a monitoring-event ingest daemon: resolves
//! monitored objects to database ids through an in-memory cache, and
//! dispatches decoded broker events to prepared-statement handlers.

mod cache;
mod executor;
mod handlers;
mod mysql;
mod session;
mod statement;
mod statements;

pub use cache::ObjectCache;
pub use executor::{ExecOutcome, Executor, Row};
pub use mysql::MySqlExecutor;
pub use session::Session;
pub use statement::{Registry, StmtId};

pub use mon2db_core::{
    bind, convert,
    event::{self, EventInput, EventKind, Field, MbufKind},
    object::ObjectKind,
    scratch, value::Value, Error, Result,
};
