//! Backend handle objects produced by the session factories
//!
//! The generic statement-execution layer drives these, the session
//! only constructs them.

use rsdbal_core::{BlobBackend, RowidBackend, StatementBackend};

/// Handle of one prepared statement.
#[derive(Debug, Clone)]
pub struct PgStatementBackend {
    name: String,
    single_row: bool,
}

impl PgStatementBackend {
    pub(crate) fn new(name: String, single_row: bool) -> Self {
        PgStatementBackend { name, single_row }
    }

    /// Whether the session requested single-row fetch mode.
    pub fn single_row(&self) -> bool {
        self.single_row
    }
}

impl StatementBackend for PgStatementBackend {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Handle of one large object, identified by its oid.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgBlobBackend {
    oid: Option<u32>,
}

impl PgBlobBackend {
    pub fn assign(&mut self, oid: u32) {
        self.oid = Some(oid);
    }

    pub fn oid(&self) -> Option<u32> {
        self.oid
    }
}

impl BlobBackend for PgBlobBackend {
    fn is_assigned(&self) -> bool {
        self.oid.is_some()
    }
}

/// Handle of one physical row identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgRowidBackend {
    oid: Option<u32>,
}

impl PgRowidBackend {
    pub fn assign(&mut self, oid: u32) {
        self.oid = Some(oid);
    }

    pub fn oid(&self) -> Option<u32> {
        self.oid
    }
}

impl RowidBackend for PgRowidBackend {
    fn is_assigned(&self) -> bool {
        self.oid.is_some()
    }
}
