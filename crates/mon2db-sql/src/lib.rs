//! SQL text generation for the persistence layer's prepared statements.
//!
//! Statement templates are printed once at preparation time from the
//! binding descriptors; the session's instance id is interpolated as a
//! literal since it never changes for a live connection.

mod table;
mod template;

pub use table::Table;
pub use template::SqlBuilder;
