pub mod bind;
pub mod convert;
pub mod event;
pub mod object;
pub mod scratch;
pub mod value;

pub use object::ObjectKind;
pub use value::Value;

/// A Result type alias over [`anyhow::Error`].
///
/// The persistence layer deliberately keeps a two-valued error taxonomy:
/// callers only ever branch on ok/err, never on the cause.
pub type Result<T, E = anyhow::Error> = core::result::Result<T, E>;

pub use anyhow::Error;
