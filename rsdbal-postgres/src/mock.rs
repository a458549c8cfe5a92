//! Scripted driver used by the crate tests

use std::fs::File;

use crate::driver::{ConnStatus, ExecStatus, PgDriver};

#[derive(Debug)]
pub struct MockResult {
    pub status: ExecStatus,
    pub rows: Vec<Vec<String>>,
    pub error: String,
}

impl MockResult {
    pub fn command_ok() -> Self {
        MockResult {
            status: ExecStatus::CommandOk,
            rows: vec![],
            error: String::new(),
        }
    }

    pub fn tuples(rows: Vec<Vec<String>>) -> Self {
        MockResult {
            status: ExecStatus::TuplesOk,
            rows,
            error: String::new(),
        }
    }

    pub fn error(msg: &str) -> Self {
        MockResult {
            status: ExecStatus::FatalError,
            rows: vec![],
            error: msg.to_string(),
        }
    }
}

/// Driver double answering from a small script.
///
/// Every handle acquisition and release is counted so tests can assert
/// the exactly-once discipline.
pub struct MockDriver {
    /// connect() returns None
    pub fail_connect: bool,
    /// status() answers Bad
    pub bad_status: bool,
    /// the ping probe flips the cached status to Bad
    pub break_on_ping: bool,
    /// queries with these prefixes produce fatal results
    pub fail_sql: Vec<String>,

    pub search_path: String,
    pub current_user: String,
    pub server_version: u32,
    pub lib_version: u32,
    pub sequence_value: i64,

    /// Everything sent through the driver, conninfo included
    pub executed: Vec<String>,
    pub finished: usize,
    pub cleared: usize,
    pub live_results: isize,

    next_conn: u32,
}

impl Default for MockDriver {
    fn default() -> Self {
        MockDriver {
            fail_connect: false,
            bad_status: false,
            break_on_ping: false,
            fail_sql: vec![],
            search_path: r#""$user", public"#.to_string(),
            current_user: "scott".to_string(),
            server_version: 120_005,
            lib_version: 120_005,
            sequence_value: 42,
            executed: vec![],
            finished: 0,
            cleared: 0,
            live_results: 0,
            next_conn: 0,
        }
    }
}

impl MockDriver {
    pub fn fresh_result(&mut self, res: MockResult) -> MockResult {
        self.live_results += 1;
        res
    }

    fn script(&mut self, sql: &str) -> MockResult {
        if self.fail_sql.iter().any(|q| sql.starts_with(q.as_str())) {
            return MockResult::error(&format!("ERROR: scripted failure for \"{}\"", sql));
        }

        if sql == "SHOW search_path" {
            return MockResult::tuples(vec![vec![self.search_path.clone()]]);
        }
        if sql == "SELECT current_user" {
            return MockResult::tuples(vec![vec![self.current_user.clone()]]);
        }
        if sql.starts_with("SELECT nextval") {
            return MockResult::tuples(vec![vec![self.sequence_value.to_string()]]);
        }

        MockResult::command_ok()
    }
}

impl PgDriver for MockDriver {
    type Conn = u32;
    type QueryResult = MockResult;

    fn connect(&mut self, conninfo: &str) -> Option<u32> {
        self.executed.push(format!("connect: {}", conninfo));

        if self.fail_connect {
            return None;
        }

        self.next_conn += 1;
        Some(self.next_conn)
    }

    fn status(&mut self, _conn: &u32) -> ConnStatus {
        if self.bad_status {
            ConnStatus::Bad
        } else {
            ConnStatus::Ok
        }
    }

    fn error_message(&mut self, _conn: &u32) -> String {
        "FATAL: scripted connection failure".to_string()
    }

    fn finish(&mut self, _conn: u32) {
        self.finished += 1;
    }

    fn exec(&mut self, _conn: &mut u32, sql: &str) -> Option<MockResult> {
        self.executed.push(sql.to_string());

        if sql == "/* ping */" && self.break_on_ping {
            self.bad_status = true;
        }

        let res = self.script(sql);
        Some(self.fresh_result(res))
    }

    fn result_status(&mut self, res: &MockResult) -> ExecStatus {
        res.status
    }

    fn result_error(&mut self, res: &MockResult) -> String {
        res.error.clone()
    }

    fn ntuples(&mut self, res: &MockResult) -> usize {
        res.rows.len()
    }

    fn value(&mut self, res: &MockResult, row: usize, col: usize) -> String {
        res.rows[row][col].clone()
    }

    fn clear(&mut self, _res: MockResult) {
        self.cleared += 1;
        self.live_results -= 1;
    }

    fn escape_string(&mut self, _conn: &mut u32, s: &str) -> String {
        s.replace('\\', r"\\").replace('\'', "''")
    }

    fn server_version(&mut self, _conn: &u32) -> u32 {
        self.server_version
    }

    fn lib_version(&self) -> u32 {
        self.lib_version
    }

    fn socket(&mut self, _conn: &u32) -> i32 {
        -1
    }

    fn trace(&mut self, _conn: &mut u32, _file: &File) {}
}
