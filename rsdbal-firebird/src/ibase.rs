//! Packed scalar types of the InterBase/Firebird client API

/// Fractions of a second stored per time unit
pub const ISC_TIME_SECONDS_PRECISION: u32 = 10_000;

/// Days since 1858-11-17 (modified Julian day)
pub type IscDate = i32;

/// Fractions of a second since midnight
pub type IscTime = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct IscTimestamp {
    pub timestamp_date: IscDate,
    pub timestamp_time: IscTime,
}

/// Wire-level identifier of a large object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct BlobId {
    pub quad_high: i32,
    pub quad_low: u32,
}
