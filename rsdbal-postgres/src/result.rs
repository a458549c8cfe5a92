//! Query result wrapper

use crate::driver::{ExecStatus, PgDriver};
use rsdbal_core::Error;

/// Owns one native query result and releases it on scope exit.
///
/// Never outlives the query that produced it. Dropping clears the
/// native handle, a no-op if there is none.
pub struct PgResult<'d, D: PgDriver> {
    driver: &'d mut D,
    res: Option<D::QueryResult>,
}

impl<'d, D: PgDriver> PgResult<'d, D> {
    pub fn new(driver: &'d mut D, res: Option<D::QueryResult>) -> Self {
        PgResult { driver, res }
    }

    /// Raise a query error when the result status indicates failure.
    ///
    /// The error carries `msg` plus the native diagnostic text.
    pub fn check_for_errors(&mut self, msg: &str) -> Result<(), Error> {
        match &self.res {
            Some(res) => {
                if self.driver.result_status(res).is_ok() {
                    Ok(())
                } else {
                    let native = self.driver.result_error(res);
                    Err(Error::Query(join_diagnostic(msg, &native)))
                }
            }
            None => Err(Error::Query(format!(
                "{}\nthe server did not return a result",
                msg
            ))),
        }
    }

    /// Like [`check_for_errors`], additionally telling whether the
    /// result carries rows.
    ///
    /// [`check_for_errors`]: PgResult::check_for_errors
    pub fn check_for_data(&mut self, msg: &str) -> Result<bool, Error> {
        self.check_for_errors(msg)?;

        match &self.res {
            Some(res) => Ok(self.driver.result_status(res) == ExecStatus::TuplesOk),
            None => Ok(false),
        }
    }

    pub fn ntuples(&mut self) -> usize {
        match &self.res {
            Some(res) => self.driver.ntuples(res),
            None => 0,
        }
    }

    pub fn value(&mut self, row: usize, col: usize) -> Option<String> {
        match &self.res {
            Some(res) => Some(self.driver.value(res, row, col)),
            None => None,
        }
    }
}

impl<D: PgDriver> Drop for PgResult<'_, D> {
    fn drop(&mut self) {
        if let Some(res) = self.res.take() {
            self.driver.clear(res);
        }
    }
}

fn join_diagnostic(msg: &str, native: &str) -> String {
    if native.is_empty() {
        msg.to_string()
    } else {
        format!("{}\n{}", msg, native)
    }
}
