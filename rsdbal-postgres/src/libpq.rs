//! FFI binding to the native libpq library
//!
//! Only compiled with the `linking` feature, which links against the
//! system libpq at build time.

#![allow(non_camel_case_types, dead_code)]

use std::ffi::{CStr, CString};
use std::fs::File;
use std::os::raw::{c_char, c_int, c_void};

use crate::driver::{ConnStatus, ExecStatus, PgDriver};

/// Opaque connection handle
#[repr(C)]
pub struct PGconn {
    _private: [u8; 0],
}

/// Opaque query result handle
#[repr(C)]
pub struct PGresult {
    _private: [u8; 0],
}

const CONNECTION_OK: c_int = 0;

const PGRES_EMPTY_QUERY: c_int = 0;
const PGRES_COMMAND_OK: c_int = 1;
const PGRES_TUPLES_OK: c_int = 2;
const PGRES_COPY_OUT: c_int = 3;
const PGRES_COPY_IN: c_int = 4;
const PGRES_BAD_RESPONSE: c_int = 5;
const PGRES_NONFATAL_ERROR: c_int = 6;
const PGRES_FATAL_ERROR: c_int = 7;

#[link(name = "pq")]
extern "C" {
    fn PQconnectdb(conninfo: *const c_char) -> *mut PGconn;
    fn PQstatus(conn: *const PGconn) -> c_int;
    fn PQerrorMessage(conn: *const PGconn) -> *const c_char;
    fn PQfinish(conn: *mut PGconn);
    fn PQexec(conn: *mut PGconn, query: *const c_char) -> *mut PGresult;
    fn PQresultStatus(res: *const PGresult) -> c_int;
    fn PQresultErrorMessage(res: *const PGresult) -> *const c_char;
    fn PQntuples(res: *const PGresult) -> c_int;
    fn PQgetvalue(res: *const PGresult, row: c_int, col: c_int) -> *const c_char;
    fn PQclear(res: *mut PGresult);
    fn PQescapeStringConn(
        conn: *mut PGconn,
        to: *mut c_char,
        from: *const c_char,
        length: usize,
        error: *mut c_int,
    ) -> usize;
    fn PQserverVersion(conn: *const PGconn) -> c_int;
    fn PQlibVersion() -> c_int;
    fn PQsocket(conn: *const PGconn) -> c_int;
    fn PQtrace(conn: *mut PGconn, stream: *mut c_void);
}

/// Native connection pointer. Owned by the session backend, released
/// through [`PgDriver::finish`] exactly once.
pub struct NativeConn(*mut PGconn);

// The session backend serializes all access.
unsafe impl Send for NativeConn {}

/// Native result pointer, released through [`PgDriver::clear`].
pub struct NativeResult(*mut PGresult);

unsafe impl Send for NativeResult {}

/// [`PgDriver`] implementation backed by the linked libpq.
#[derive(Default)]
pub struct LibpqDriver {
    // fdopen()ed duplicate of the trace file descriptor, closed when
    // the traced connection finishes
    trace_stream: Option<*mut c_void>,
}

impl LibpqDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn close_trace_stream(&mut self) {
        #[cfg(unix)]
        if let Some(stream) = self.trace_stream.take() {
            unsafe {
                libc::fclose(stream as *mut libc::FILE);
            }
        }
        #[cfg(not(unix))]
        {
            self.trace_stream = None;
        }
    }
}

fn string_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }

    unsafe { CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned()
}

impl PgDriver for LibpqDriver {
    type Conn = NativeConn;
    type QueryResult = NativeResult;

    fn connect(&mut self, conninfo: &str) -> Option<NativeConn> {
        let conninfo = CString::new(conninfo).ok()?;

        let conn = unsafe { PQconnectdb(conninfo.as_ptr()) };
        if conn.is_null() {
            None
        } else {
            Some(NativeConn(conn))
        }
    }

    fn status(&mut self, conn: &NativeConn) -> ConnStatus {
        if unsafe { PQstatus(conn.0) } == CONNECTION_OK {
            ConnStatus::Ok
        } else {
            ConnStatus::Bad
        }
    }

    fn error_message(&mut self, conn: &NativeConn) -> String {
        string_from_ptr(unsafe { PQerrorMessage(conn.0) })
    }

    fn finish(&mut self, conn: NativeConn) {
        unsafe { PQfinish(conn.0) };
        self.close_trace_stream();
    }

    fn exec(&mut self, conn: &mut NativeConn, sql: &str) -> Option<NativeResult> {
        let sql = CString::new(sql).ok()?;

        let res = unsafe { PQexec(conn.0, sql.as_ptr()) };
        if res.is_null() {
            None
        } else {
            Some(NativeResult(res))
        }
    }

    fn result_status(&mut self, res: &NativeResult) -> ExecStatus {
        match unsafe { PQresultStatus(res.0) } {
            PGRES_EMPTY_QUERY => ExecStatus::EmptyQuery,
            PGRES_COMMAND_OK => ExecStatus::CommandOk,
            PGRES_TUPLES_OK => ExecStatus::TuplesOk,
            PGRES_COPY_OUT => ExecStatus::CopyOut,
            PGRES_COPY_IN => ExecStatus::CopyIn,
            PGRES_BAD_RESPONSE => ExecStatus::BadResponse,
            PGRES_NONFATAL_ERROR => ExecStatus::NonfatalError,
            _ => ExecStatus::FatalError,
        }
    }

    fn result_error(&mut self, res: &NativeResult) -> String {
        string_from_ptr(unsafe { PQresultErrorMessage(res.0) })
    }

    fn ntuples(&mut self, res: &NativeResult) -> usize {
        unsafe { PQntuples(res.0) }.max(0) as usize
    }

    fn value(&mut self, res: &NativeResult, row: usize, col: usize) -> String {
        string_from_ptr(unsafe { PQgetvalue(res.0, row as c_int, col as c_int) })
    }

    fn clear(&mut self, res: NativeResult) {
        unsafe { PQclear(res.0) };
    }

    fn escape_string(&mut self, conn: &mut NativeConn, s: &str) -> String {
        // Worst case every input byte escapes to two, plus the NUL.
        let mut buf = vec![0 as c_char; 2 * s.len() + 1];
        let mut error: c_int = 0;

        let written = unsafe {
            PQescapeStringConn(
                conn.0,
                buf.as_mut_ptr(),
                s.as_ptr() as *const c_char,
                s.len(),
                &mut error,
            )
        };

        if error != 0 {
            return String::new();
        }

        let bytes: Vec<u8> = buf[..written].iter().map(|&c| c as u8).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn server_version(&mut self, conn: &NativeConn) -> u32 {
        unsafe { PQserverVersion(conn.0) }.max(0) as u32
    }

    fn lib_version(&self) -> u32 {
        unsafe { PQlibVersion() }.max(0) as u32
    }

    fn socket(&mut self, conn: &NativeConn) -> i32 {
        unsafe { PQsocket(conn.0) }
    }

    #[cfg(unix)]
    fn trace(&mut self, conn: &mut NativeConn, file: &File) {
        use std::os::unix::io::AsRawFd;

        // libpq keeps writing to the stream for the connection's
        // lifetime, so it gets its own descriptor.
        unsafe {
            let fd = libc::dup(file.as_raw_fd());
            if fd < 0 {
                return;
            }

            let stream = libc::fdopen(fd, b"a\0".as_ptr() as *const c_char);
            if stream.is_null() {
                libc::close(fd);
                return;
            }

            PQtrace(conn.0, stream as *mut c_void);
            self.close_trace_stream();
            self.trace_stream = Some(stream as *mut c_void);
        }
    }

    #[cfg(not(unix))]
    fn trace(&mut self, _conn: &mut NativeConn, _file: &File) {}
}

impl Drop for LibpqDriver {
    fn drop(&mut self) {
        self.close_trace_stream();
    }
}
