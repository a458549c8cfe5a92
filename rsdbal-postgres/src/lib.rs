//! PostgreSQL session backend
//!
//! Owns one physical libpq connection and mediates every session
//! scoped native operation: connect/reconnect, transaction control,
//! prepared statement lifecycle, schema introspection query
//! generation and connectivity probing.
//!
//! The libpq surface is abstracted behind the [`PgDriver`] trait, the
//! actual FFI binding links in with the `linking` feature.

mod driver;
#[cfg(feature = "linking")]
mod libpq;
#[cfg(test)]
pub(crate) mod mock;
mod result;
mod session;
mod stmt;
mod tuning;

pub use driver::{ConnStatus, ExecStatus, PgDriver};
#[cfg(feature = "linking")]
pub use libpq::LibpqDriver;
pub use result::PgResult;
pub use rsdbal_core::{ConnParams, Error, SessionBackend};
pub use session::PgSessionBackend;
pub use stmt::{PgBlobBackend, PgRowidBackend, PgStatementBackend};
pub use tuning::TcpTimeoutStrategy;
