//!
//! Database access backends
//!
//! Two independent pieces behind one roof: the Firebird wire codec
//! (text parameters packed to and from the native column buffers) and
//! the PostgreSQL session backend (libpq connection lifecycle,
//! transactions, prepared statement bookkeeping and schema
//! introspection). Both implement the backend traits of
//! [`rsdbal_core`].

pub mod prelude {
    pub use rsdbal_core::{
        BlobBackend, ConnParams, RowidBackend, SessionBackend, StatementBackend,
    };
}

pub use rsdbal_core::{ConnParams, Error};

#[cfg(feature = "firebird")]
pub use rsdbal_firebird as firebird;

#[cfg(feature = "postgres")]
pub use rsdbal_postgres as postgres;
