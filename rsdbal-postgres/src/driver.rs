//! Seam over the libpq client surface
//!
//! The session talks to the native library only through this trait,
//! which keeps the session logic testable and leaves the linkage
//! choice to the crate features.

use std::fs::File;

/// Cached status of a connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnStatus {
    Ok,
    Bad,
}

/// Status of one query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    EmptyQuery,
    CommandOk,
    TuplesOk,
    CopyOut,
    CopyIn,
    BadResponse,
    NonfatalError,
    FatalError,
}

impl ExecStatus {
    /// Whether the result reports a successfully executed statement.
    pub fn is_ok(self) -> bool {
        matches!(self, ExecStatus::CommandOk | ExecStatus::TuplesOk)
    }
}

/// The part of the libpq API the session backend needs.
///
/// Handles are owned values: a `Conn` returned by [`connect`] must be
/// released through [`finish`], a `QueryResult` through [`clear`],
/// each exactly once.
///
/// [`connect`]: PgDriver::connect
/// [`finish`]: PgDriver::finish
/// [`clear`]: PgDriver::clear
pub trait PgDriver {
    type Conn;
    type QueryResult;

    /// PQconnectdb. `None` stands for the null handle.
    fn connect(&mut self, conninfo: &str) -> Option<Self::Conn>;

    /// PQstatus
    fn status(&mut self, conn: &Self::Conn) -> ConnStatus;

    /// PQerrorMessage
    fn error_message(&mut self, conn: &Self::Conn) -> String;

    /// PQfinish
    fn finish(&mut self, conn: Self::Conn);

    /// PQexec. `None` stands for the null result.
    fn exec(&mut self, conn: &mut Self::Conn, sql: &str) -> Option<Self::QueryResult>;

    /// PQresultStatus
    fn result_status(&mut self, res: &Self::QueryResult) -> ExecStatus;

    /// PQresultErrorMessage
    fn result_error(&mut self, res: &Self::QueryResult) -> String;

    /// PQntuples
    fn ntuples(&mut self, res: &Self::QueryResult) -> usize;

    /// PQgetvalue
    fn value(&mut self, res: &Self::QueryResult, row: usize, col: usize) -> String;

    /// PQclear
    fn clear(&mut self, res: Self::QueryResult);

    /// PQescapeStringConn. Returns the escaped text without the outer
    /// quotes, or an empty string when escaping fails.
    fn escape_string(&mut self, conn: &mut Self::Conn, s: &str) -> String;

    /// PQserverVersion, e.g. 120005 for 12.5
    fn server_version(&mut self, conn: &Self::Conn) -> u32;

    /// PQlibVersion of the client library itself
    fn lib_version(&self) -> u32;

    /// PQsocket
    fn socket(&mut self, conn: &Self::Conn) -> i32;

    /// PQtrace
    fn trace(&mut self, conn: &mut Self::Conn, file: &File);
}
