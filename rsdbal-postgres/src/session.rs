//! Session backend owning one physical PostgreSQL connection

use std::fs::{File, OpenOptions};

use log::debug;

use crate::{
    driver::{ConnStatus, PgDriver},
    result::PgResult,
    stmt::{PgBlobBackend, PgRowidBackend, PgStatementBackend},
    tuning::{apply_tcp_user_timeout, parse_timeout_ms, TcpTimeoutStrategy},
};
use rsdbal_core::{ConnParams, Error, SessionBackend};

/// Prefix of the generated statement names
const STATEMENT_NAME_PREFIX: &str = "st_";

/// Adapter owning one libpq connection for its whole lifetime.
///
/// Either holds a valid native handle or is definitively closed, no
/// partially initialized state is ever exposed. Synchronous and not
/// internally locked, two sessions are fully independent.
pub struct PgSessionBackend<D: PgDriver> {
    driver: D,
    conn: Option<D::Conn>,
    trace_file: Option<File>,
    saved_params: Option<ConnParams>,
    single_row_mode: bool,
    deallocate_prepared_statements: bool,
    statement_count: u32,
}

impl<D: PgDriver> PgSessionBackend<D> {
    pub fn new(driver: D) -> Self {
        PgSessionBackend {
            driver,
            conn: None,
            trace_file: None,
            saved_params: None,
            single_row_mode: false,
            deallocate_prepared_statements: true,
            statement_count: 0,
        }
    }

    pub fn single_row_mode(&self) -> bool {
        self.single_row_mode
    }

    /// Some servers clean prepared statements up on disconnect
    /// themselves, in which case explicit deallocation is redundant
    /// and may even error. The statement layer turns it off then.
    pub fn set_deallocate_prepared_statements(&mut self, deallocate: bool) {
        self.deallocate_prepared_statements = deallocate;
    }

    /// Post-connect setup on a handle the session does not own yet.
    ///
    /// Any error here makes `connect` release the handle before
    /// propagating.
    fn configure(
        &mut self,
        conn: &mut D::Conn,
        trace_file: Option<&File>,
        timeout_ms: Option<i64>,
        timeout_strategy: TcpTimeoutStrategy,
    ) -> Result<(), Error> {
        if self.driver.status(conn) != ConnStatus::Ok {
            let mut msg = String::from("cannot establish connection to the database");
            let native = self.driver.error_message(conn);
            if !native.is_empty() {
                msg.push('\n');
                msg.push_str(&native);
            }
            return Err(Error::Connection(msg));
        }

        if let Some(file) = trace_file {
            self.driver.trace(conn, file);
        }

        if let Some(ms) = timeout_ms {
            apply_tcp_user_timeout(timeout_strategy, self.driver.socket(conn), ms)?;
        }

        // Older servers do not round-trip floats losslessly by
        // default. Fixed in 12, the maximum supported setting was 2
        // until 9.x and 3 after it.
        let version = self.driver.server_version(conn);
        if version < 120_000 {
            let sql = if version >= 90_000 {
                "SET extra_float_digits = 3"
            } else {
                "SET extra_float_digits = 2"
            };
            let res = self.driver.exec(conn, sql);
            PgResult::new(&mut self.driver, res)
                .check_for_errors("cannot set extra_float_digits parameter")?;
        }

        Ok(())
    }

    /// Run a hardcoded statement on the owned connection.
    fn hard_exec(&mut self, sql: &str, err_msg: &str) -> Result<(), Error> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| Error::Connection("the session is not connected".to_string()))?;

        let res = self.driver.exec(conn, sql);
        PgResult::new(&mut self.driver, res).check_for_errors(err_msg)
    }

    /// Like [`hard_exec`] but reporting failures as transaction
    /// errors.
    ///
    /// [`hard_exec`]: PgSessionBackend::hard_exec
    fn transaction_exec(&mut self, sql: &str, err_msg: &str) -> Result<(), Error> {
        match self.hard_exec(sql, err_msg) {
            Err(Error::Query(msg)) => Err(Error::Transaction(msg)),
            other => other,
        }
    }

    /// First column of the first row, or an empty string when the
    /// query yields no rows.
    fn single_value_query(&mut self, sql: &str, err_msg: &str) -> Result<String, Error> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| Error::Connection("the session is not connected".to_string()))?;

        let res = self.driver.exec(conn, sql);
        let mut result = PgResult::new(&mut self.driver, res);

        if !result.check_for_data(err_msg)? || result.ntuples() == 0 {
            return Ok(String::new());
        }

        Ok(result.value(0, 0).unwrap_or_default())
    }

    /// Driver-escape a value and wrap it in single quotes for
    /// embedding in generated SQL.
    fn quote(&mut self, value: &str) -> Result<String, Error> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| Error::Connection("the session is not connected".to_string()))?;

        Ok(format!("'{}'", self.driver.escape_string(conn, value)))
    }

    /// Resolve the server's active schema search path into a priority
    /// ordered list of quoted schema names.
    ///
    /// Request scoped and recomputed per query, never cached.
    fn schema_names(&mut self) -> Result<Vec<String>, Error> {
        let mut content =
            self.single_value_query("SHOW search_path", "search_path doesn't exist")?;
        if content.is_empty() {
            // Fall back to the server default.
            content = r#""$user", public"#.to_string();
        }

        let mut names = split_search_path(&content);

        for name in names.iter_mut() {
            if name == "$user" {
                let user =
                    self.single_value_query("SELECT current_user", "current_user is not defined")?;
                if !user.is_empty() {
                    *name = user;
                }
            }

            // Ensure no bad characters reach the generated SQL.
            *name = self.quote(name)?;
        }

        Ok(names)
    }
}

impl<D: PgDriver> SessionBackend for PgSessionBackend<D> {
    type Statement = PgStatementBackend;
    type Blob = PgBlobBackend;
    type Rowid = PgRowidBackend;

    fn connect(&mut self, parameters: &ConnParams) -> Result<(), Error> {
        self.close();

        let mut params = parameters.clone();

        // Present when called through the front-end reconnect path,
        // of no use to this backend.
        params.extract("reconnect");

        // Both spellings are accepted for compatibility.
        let single_row = params
            .extract("singlerow")
            .or_else(|| params.extract("singlerows"));
        self.single_row_mode = single_row
            .map(|v| ConnParams::is_true_value(&v))
            .unwrap_or(false);

        let trace_file = match params.extract("tracefile") {
            Some(value) if !value.is_empty() => Some(open_trace_file(&value)?),
            _ => None,
        };

        // A libpq older than 12 does not know the tcp_user_timeout
        // option, so it must not reach the native parser and is
        // applied to the socket below instead. Parsed eagerly, before
        // the connection attempt.
        let timeout_strategy = TcpTimeoutStrategy::detect();
        let timeout_ms = if self.driver.lib_version() < 120_000 {
            match params.extract("tcp_user_timeout") {
                Some(value) => Some(parse_timeout_ms(&value)?),
                None => None,
            }
        } else {
            None
        };

        // libpq quotes with single quotes, unlike this library's own
        // convention, so the option string is rebuilt.
        let conninfo = params.build_conninfo('\'');

        let mut conn = match self.driver.connect(&conninfo) {
            Some(conn) => conn,
            None => {
                return Err(Error::Connection(
                    "cannot establish connection to the database".to_string(),
                ))
            }
        };

        match self.configure(&mut conn, trace_file.as_ref(), timeout_ms, timeout_strategy) {
            Ok(()) => {
                self.conn = Some(conn);
                self.trace_file = trace_file;
                self.saved_params = Some(parameters.clone());
                debug!("session connected");
                Ok(())
            }
            Err(e) => {
                // The handle never became owned by the session.
                self.driver.finish(conn);
                Err(e)
            }
        }
    }

    fn reconnect(&mut self) -> Result<(), Error> {
        let params = self.saved_params.clone().ok_or_else(|| {
            Error::Connection("no connection parameters to reconnect with".to_string())
        })?;

        self.connect(&params)
    }

    fn is_connected(&mut self) -> bool {
        match self.conn.as_mut() {
            Some(conn) => {
                if self.driver.status(conn) != ConnStatus::Ok {
                    return false;
                }

                // The cached status can be stale after a network
                // failure, so force an actual round trip. The probe
                // result itself is irrelevant and never raises, only
                // the re-checked status counts.
                let res = self.driver.exec(conn, "/* ping */");
                drop(PgResult::new(&mut self.driver, res));
            }
            None => return false,
        }

        match &self.conn {
            Some(conn) => self.driver.status(conn) == ConnStatus::Ok,
            None => false,
        }
    }

    fn begin(&mut self) -> Result<(), Error> {
        self.transaction_exec("BEGIN", "cannot begin transaction")
    }

    fn commit(&mut self) -> Result<(), Error> {
        self.transaction_exec("COMMIT", "cannot commit transaction")
    }

    fn rollback(&mut self) -> Result<(), Error> {
        self.transaction_exec("ROLLBACK", "cannot rollback transaction")
    }

    fn make_statement(&mut self) -> PgStatementBackend {
        PgStatementBackend::new(self.next_statement_name(), self.single_row_mode)
    }

    fn make_blob(&mut self) -> PgBlobBackend {
        PgBlobBackend::default()
    }

    fn make_rowid(&mut self) -> PgRowidBackend {
        PgRowidBackend::default()
    }

    fn deallocate_prepared(&mut self, name: &str) -> Result<(), Error> {
        if !self.deallocate_prepared_statements {
            return Ok(());
        }

        let sql = format!("DEALLOCATE {}", name);
        self.hard_exec(&sql, "cannot deallocate prepared statement")
    }

    fn deallocate_all_prepared(&mut self) -> Result<(), Error> {
        self.hard_exec("DEALLOCATE ALL", "cannot deallocate all prepared statements")
    }

    fn next_statement_name(&mut self) -> String {
        // Never reset, names stay unique for the session's lifetime.
        self.statement_count += 1;
        format!("{}{}", STATEMENT_NAME_PREFIX, self.statement_count)
    }

    fn next_sequence_value(&mut self, sequence: &str) -> Result<i64, Error> {
        let sql = format!("SELECT nextval('{}')", sequence);
        let value = self.single_value_query(&sql, "cannot get the next sequence value")?;

        value.parse::<i64>().map_err(|_| {
            Error::Query(format!(
                "sequence \"{}\" produced a non-integer value \"{}\"",
                sequence, value
            ))
        })
    }

    fn table_names_query(&mut self) -> Result<String, Error> {
        let schema_list = self.schema_names()?;

        Ok(format!(
            r#"SELECT table_schema || '.' || table_name AS "TABLE_NAME" FROM information_schema.tables WHERE table_schema in ({})"#,
            comma_list(&schema_list)
        ))
    }

    fn column_descriptions_query(&mut self) -> Result<String, Error> {
        let schema_list = self.schema_names()?;

        Ok(format!(
            "WITH Schema AS (\
             SELECT table_schema \
             FROM information_schema.columns \
             WHERE table_name = :t \
             AND CASE \
             WHEN :s::VARCHAR is not NULL THEN table_schema = :s::VARCHAR \
             ELSE table_schema in ({list}) END \
             ORDER BY \
             CASE table_schema{case_list} \
             ELSE {fallback} END \
             LIMIT 1 ) \
             SELECT column_name as \"COLUMN_NAME\", \
             data_type as \"DATA_TYPE\", \
             character_maximum_length as \"CHARACTER_MAXIMUM_LENGTH\", \
             numeric_precision as \"NUMERIC_PRECISION\", \
             numeric_scale as \"NUMERIC_SCALE\", \
             is_nullable as \"IS_NULLABLE\" \
             FROM information_schema.columns \
             WHERE table_name = :t \
             AND table_schema = ( SELECT table_schema FROM Schema )",
            list = comma_list(&schema_list),
            case_list = case_list(&schema_list),
            fallback = schema_list.len(),
        ))
    }

    fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.driver.finish(conn);
            debug!("session disconnected");
        }

        self.trace_file = None;
    }
}

impl<D: PgDriver> Drop for PgSessionBackend<D> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Open the trace file named by the `tracefile` option. A leading `+`
/// requests append mode.
fn open_trace_file(value: &str) -> Result<File, Error> {
    let (path, append) = match value.strip_prefix('+') {
        Some(rest) => (rest, true),
        None => (value, false),
    };

    let mut options = OpenOptions::new();
    if append {
        options.append(true).create(true);
    } else {
        options.write(true).create(true).truncate(true);
    }

    options.open(path).map_err(|e| {
        Error::Connection(format!("cannot open database trace file \"{}\": {}", path, e))
    })
}

/// Split a search_path value on commas, respecting double quoted
/// segments: commas and spaces inside quotes are literal.
fn split_search_path(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in content.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' | ' ' if !quoted => {
                if c == ',' {
                    names.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        names.push(current);
    }

    names
}

fn comma_list(items: &[String]) -> String {
    items.join(", ")
}

fn case_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!(" WHEN {} THEN {}", item, i))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock::MockDriver;
    use rsdbal_core::StatementBackend;
    use std::io::Write;
    use std::path::PathBuf;

    fn connected_session() -> PgSessionBackend<MockDriver> {
        let mut session = PgSessionBackend::new(MockDriver::default());
        session
            .connect(&ConnParams::parse("host=localhost dbname=test").unwrap())
            .unwrap();
        session
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rsdbal_{}_{}.log", tag, rand::random::<u32>()))
    }

    #[test]
    fn connect_passes_only_unconsumed_options_through() -> Result<(), Error> {
        let mut session = PgSessionBackend::new(MockDriver::default());

        session.connect(&ConnParams::parse(
            "host=localhost dbname=test singlerows=yes",
        )?)?;

        assert!(session.single_row_mode());
        assert_eq!(
            "connect: host='localhost' dbname='test'",
            session.driver.executed[0]
        );

        Ok(())
    }

    #[test]
    fn single_row_mode_needs_a_truthy_value() -> Result<(), Error> {
        let mut session = PgSessionBackend::new(MockDriver::default());
        session.connect(&ConnParams::parse("host=h singlerow=0")?)?;
        assert!(!session.single_row_mode());

        session.connect(&ConnParams::parse("host=h singlerow=true")?)?;
        assert!(session.single_row_mode());

        Ok(())
    }

    #[test]
    fn failed_connect_owns_no_handle() {
        let mut driver = MockDriver::default();
        driver.fail_connect = true;
        let mut session = PgSessionBackend::new(driver);

        let err = session
            .connect(&ConnParams::parse("host=nowhere").unwrap())
            .unwrap_err();

        assert!(matches!(err, Error::Connection(_)));
        assert!(!session.is_connected());
        assert_eq!(0, session.driver.finished);

        // Cleanup afterwards is a safe no-op.
        session.close();
        assert_eq!(0, session.driver.finished);
    }

    #[test]
    fn bad_status_releases_the_handle() {
        let mut driver = MockDriver::default();
        driver.bad_status = true;
        let mut session = PgSessionBackend::new(driver);

        let err = session
            .connect(&ConnParams::parse("host=nowhere").unwrap())
            .unwrap_err();

        match err {
            Error::Connection(msg) => {
                assert!(msg.contains("FATAL: scripted connection failure"))
            }
            other => panic!("expected a connection error, got {:?}", other),
        }
        assert_eq!(1, session.driver.finished);
        assert!(session.conn.is_none());
    }

    #[test]
    fn old_servers_get_float_digits_tuning() -> Result<(), Error> {
        let mut driver = MockDriver::default();
        driver.server_version = 90_500;
        let mut session = PgSessionBackend::new(driver);
        session.connect(&ConnParams::parse("host=h")?)?;
        assert!(session
            .driver
            .executed
            .contains(&"SET extra_float_digits = 3".to_string()));

        let mut driver = MockDriver::default();
        driver.server_version = 80_400;
        let mut session = PgSessionBackend::new(driver);
        session.connect(&ConnParams::parse("host=h")?)?;
        assert!(session
            .driver
            .executed
            .contains(&"SET extra_float_digits = 2".to_string()));

        let session = connected_session();
        assert!(!session
            .driver
            .executed
            .iter()
            .any(|sql| sql.starts_with("SET extra_float_digits")));

        Ok(())
    }

    #[test]
    fn trace_file_truncates_without_plus() -> Result<(), Error> {
        let path = temp_path("trace_w");
        std::fs::write(&path, "old content")?;

        let mut session = PgSessionBackend::new(MockDriver::default());
        session.connect(&ConnParams::parse(&format!(
            "host=h tracefile={}",
            path.display()
        ))?)?;

        assert_eq!(0, std::fs::metadata(&path)?.len());

        session.close();
        std::fs::remove_file(&path)?;

        Ok(())
    }

    #[test]
    fn trace_file_appends_with_plus() -> Result<(), Error> {
        let path = temp_path("trace_a");
        let mut file = std::fs::File::create(&path)?;
        file.write_all(b"old content")?;
        drop(file);

        let mut session = PgSessionBackend::new(MockDriver::default());
        session.connect(&ConnParams::parse(&format!(
            "host=h tracefile=+{}",
            path.display()
        ))?)?;

        assert_eq!(b"old content".len() as u64, std::fs::metadata(&path)?.len());

        session.close();
        std::fs::remove_file(&path)?;

        Ok(())
    }

    #[test]
    fn tcp_user_timeout_is_consumed_by_an_old_client() -> Result<(), Error> {
        let mut driver = MockDriver::default();
        driver.lib_version = 110_000;
        let mut session = PgSessionBackend::new(driver);

        session.connect(&ConnParams::parse("host=h tcp_user_timeout=0")?)?;
        assert_eq!("connect: host='h'", session.driver.executed[0]);

        // A recent client handles the option itself, pass it through.
        let mut session = PgSessionBackend::new(MockDriver::default());
        session.connect(&ConnParams::parse("host=h tcp_user_timeout=1000")?)?;
        assert_eq!(
            "connect: host='h' tcp_user_timeout='1000'",
            session.driver.executed[0]
        );

        Ok(())
    }

    #[test]
    fn malformed_timeout_fails_before_connecting() {
        let mut driver = MockDriver::default();
        driver.lib_version = 110_000;
        let mut session = PgSessionBackend::new(driver);

        let err = session
            .connect(&ConnParams::parse("host=h tcp_user_timeout=fast").unwrap())
            .unwrap_err();

        assert!(matches!(err, Error::Parse(_)));
        assert!(session.driver.executed.is_empty());
    }

    #[test]
    fn statement_names_count_up_from_one() {
        let mut session = connected_session();

        assert_eq!("st_1", session.next_statement_name());
        assert_eq!("st_2", session.next_statement_name());
        assert_eq!("st_3", session.make_statement().name().to_string());
    }

    #[test]
    fn transaction_control() -> Result<(), Error> {
        let mut session = connected_session();

        session.begin()?;
        session.commit()?;
        session.begin()?;
        session.rollback()?;

        let executed = &session.driver.executed;
        assert!(executed.contains(&"BEGIN".to_string()));
        assert!(executed.contains(&"COMMIT".to_string()));
        assert!(executed.contains(&"ROLLBACK".to_string()));

        Ok(())
    }

    #[test]
    fn transaction_failure_carries_native_text() {
        let mut session = connected_session();
        session.driver.fail_sql.push("COMMIT".to_string());

        let err = session.commit().unwrap_err();

        match err {
            Error::Transaction(msg) => {
                assert!(msg.contains("cannot commit transaction"));
                assert!(msg.contains("scripted failure"));
            }
            other => panic!("expected a transaction error, got {:?}", other),
        }
    }

    #[test]
    fn deallocation_can_be_disabled() -> Result<(), Error> {
        let mut session = connected_session();

        session.set_deallocate_prepared_statements(false);
        session.deallocate_prepared("st_1")?;
        assert!(!session
            .driver
            .executed
            .iter()
            .any(|sql| sql.starts_with("DEALLOCATE")));

        session.set_deallocate_prepared_statements(true);
        session.deallocate_prepared("st_1")?;
        session.deallocate_all_prepared()?;
        assert!(session.driver.executed.contains(&"DEALLOCATE st_1".to_string()));
        assert!(session.driver.executed.contains(&"DEALLOCATE ALL".to_string()));

        Ok(())
    }

    #[test]
    fn sequence_values_come_from_nextval() -> Result<(), Error> {
        let mut session = connected_session();
        session.driver.sequence_value = 1234;

        assert_eq!(1234, session.next_sequence_value("my_seq")?);
        assert!(session
            .driver
            .executed
            .contains(&"SELECT nextval('my_seq')".to_string()));

        Ok(())
    }

    #[test]
    fn probe_round_trips_and_rechecks_the_status() {
        let mut session = connected_session();
        assert!(session.is_connected());
        assert!(session.driver.executed.contains(&"/* ping */".to_string()));

        // A failing probe result with a healthy status still counts as
        // connected, and never raises.
        let mut session = connected_session();
        session.driver.fail_sql.push("/* ping */".to_string());
        assert!(session.is_connected());

        // A probe that kills the connection is caught by the recheck.
        let mut session = connected_session();
        session.driver.break_on_ping = true;
        assert!(!session.is_connected());

        // A stale bad status is answered without a round trip.
        let mut session = connected_session();
        session.driver.bad_status = true;
        let before = session.driver.executed.len();
        assert!(!session.is_connected());
        assert_eq!(before, session.driver.executed.len());
    }

    #[test]
    fn schema_names_resolve_user_and_quoted_entries() -> Result<(), Error> {
        let mut session = connected_session();
        session.driver.search_path = r#""$user", public, "my schema""#.to_string();
        session.driver.current_user = "scott".to_string();

        let query = session.table_names_query()?;

        assert_eq!(
            r#"SELECT table_schema || '.' || table_name AS "TABLE_NAME" FROM information_schema.tables WHERE table_schema in ('scott', 'public', 'my schema')"#,
            query
        );

        Ok(())
    }

    #[test]
    fn schema_names_fall_back_to_the_default_path() -> Result<(), Error> {
        let mut session = connected_session();
        session.driver.search_path = String::new();
        session.driver.current_user = "joe".to_string();

        let query = session.table_names_query()?;

        assert!(query.contains("('joe', 'public')"));

        Ok(())
    }

    #[test]
    fn schema_names_are_driver_escaped() -> Result<(), Error> {
        let mut session = connected_session();
        session.driver.search_path = r#""it's odd""#.to_string();

        let query = session.table_names_query()?;

        assert!(query.contains("('it''s odd')"));

        Ok(())
    }

    #[test]
    fn column_descriptions_query_orders_by_search_path_priority() -> Result<(), Error> {
        let mut session = connected_session();
        session.driver.search_path = "first, second".to_string();

        let query = session.column_descriptions_query()?;

        assert!(query.contains("table_schema in ('first', 'second')"));
        assert!(query.contains("WHEN 'first' THEN 0"));
        assert!(query.contains("WHEN 'second' THEN 1"));
        assert!(query.contains("ELSE 2 END"));
        assert!(query.contains("table_name = :t"));

        Ok(())
    }

    #[test]
    fn reconnect_reuses_the_saved_parameters() -> Result<(), Error> {
        let mut session = connected_session();
        session.close();

        session.reconnect()?;

        let connects: Vec<_> = session
            .driver
            .executed
            .iter()
            .filter(|sql| sql.starts_with("connect:"))
            .collect();
        assert_eq!(2, connects.len());
        assert_eq!(connects[0], connects[1]);

        Ok(())
    }

    #[test]
    fn reconnect_without_a_prior_connect_fails() {
        let mut session = PgSessionBackend::new(MockDriver::default());

        assert!(matches!(session.reconnect(), Err(Error::Connection(_))));
    }

    #[test]
    fn close_is_idempotent_and_every_result_is_released() -> Result<(), Error> {
        let mut session = connected_session();

        session.begin()?;
        session.next_sequence_value("s")?;
        let _ = session.table_names_query()?;
        session.commit()?;
        assert!(session.is_connected());

        session.close();
        session.close();

        assert_eq!(1, session.driver.finished);
        assert_eq!(0, session.driver.live_results);
        assert!(!session.is_connected());

        Ok(())
    }

    #[test]
    fn split_respects_quotes() {
        assert_eq!(
            vec!["$user", "public", "my schema"],
            split_search_path(r#""$user", public, "my schema""#)
        );
        assert_eq!(
            vec!["with, comma", "plain"],
            split_search_path(r#""with, comma", plain"#)
        );
        assert_eq!(vec!["public"], split_search_path("public"));
    }
}
