//! Capability traits implemented once per database driver

use crate::{ConnParams, Error};

/// Adapter owning one physical connection to one backend.
///
/// A session is synchronous and single threaded: every operation blocks
/// until the native driver returns, and instances must not be shared
/// between threads without external serialization. Two sessions are
/// fully independent.
pub trait SessionBackend {
    type Statement: StatementBackend;
    type Blob: BlobBackend;
    type Rowid: RowidBackend;

    /// Open the native connection described by `parameters`.
    ///
    /// Backend specific options are consumed here, the remaining ones
    /// are passed through unchanged for native validation. On failure
    /// the session stays unconnected and owns no native handle.
    fn connect(&mut self, parameters: &ConnParams) -> Result<(), Error>;

    /// Close and re-open the connection with the last successful
    /// connect parameters.
    fn reconnect(&mut self) -> Result<(), Error>;

    /// Probe the server with an actual round trip.
    ///
    /// A cached status can be stale after a network failure, so a
    /// positive answer requires the probe query to have gone out.
    fn is_connected(&mut self) -> bool;

    fn begin(&mut self) -> Result<(), Error>;
    fn commit(&mut self) -> Result<(), Error>;
    fn rollback(&mut self) -> Result<(), Error>;

    fn make_statement(&mut self) -> Self::Statement;
    fn make_blob(&mut self) -> Self::Blob;
    fn make_rowid(&mut self) -> Self::Rowid;

    /// Deallocate one prepared statement by name. A no-op when the
    /// backend is configured not to deallocate.
    fn deallocate_prepared(&mut self, name: &str) -> Result<(), Error>;

    fn deallocate_all_prepared(&mut self) -> Result<(), Error>;

    /// Fresh session-unique statement name. The counter behind it
    /// never resets, so no two statements of one session collide.
    fn next_statement_name(&mut self) -> String;

    fn next_sequence_value(&mut self, sequence: &str) -> Result<i64, Error>;

    /// SQL text listing the tables visible through the active schema
    /// search path.
    fn table_names_query(&mut self) -> Result<String, Error>;

    /// SQL text describing the columns of a table, resolved against
    /// the active schema search path.
    fn column_descriptions_query(&mut self) -> Result<String, Error>;

    /// Release the native handle and any trace file. Idempotent.
    fn close(&mut self);
}

/// Backend handle of one prepared statement.
pub trait StatementBackend {
    /// Session-unique name under which the statement is prepared.
    fn name(&self) -> &str;
}

/// Backend handle of one large object.
pub trait BlobBackend {
    /// True once the handle refers to a database object.
    fn is_assigned(&self) -> bool;
}

/// Backend handle of one physical row identifier.
pub trait RowidBackend {
    /// True once the handle refers to a fetched row.
    fn is_assigned(&self) -> bool;
}
