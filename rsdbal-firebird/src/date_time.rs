//! Packed date/time codec
//!
//! Conversion between the calendar types and the numeric day/time
//! representation of the firebird wire format (ported from the
//! firebird source).
//!
//! Calendars are divided into 4 year cycles: 3 non-leap years, and 1
//! leap year. Each cycle takes 365*4 + 1 == 1461 days. There is a
//! further cycle of 100 4 year cycles. Every 100 years, the normally
//! expected leap year is not present. Every 400 years it is. This
//! cycle takes 100 * 1461 - 3 == 146097 days. Day zero of the numeric
//! representation is 1858-11-17.

use byteorder::{ByteOrder, LittleEndian};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::{
    ibase::{self, IscDate, IscTime, IscTimestamp},
    WireType,
};
use rsdbal_core::Error;

const FRACTION_TO_NANOS: u32 = 1e9 as u32 / ibase::ISC_TIME_SECONDS_PRECISION;

/// Convert a numeric day to a calendar date.
pub fn decode_date(date: IscDate) -> Result<NaiveDate, Error> {
    // Widened so that arbitrary wire values cannot overflow the
    // intermediate products below.
    let mut nday = date as i64;

    nday += 2400001 - 1721119;

    let century = (4 * nday - 1) / 146097;
    nday = 4 * nday - 1 - 146097 * century;

    let mut day = nday / 4;
    nday = (4 * day + 3) / 1461;
    day = 4 * day + 3 - 1461 * nday;
    day = (day + 4) / 4;

    let mut month = (5 * day - 3) / 153;
    day = 5 * day - 3 - 153 * month;
    day = (day + 5) / 5;

    let mut year = 100 * century + nday;

    if month < 10 {
        month += 3;
    } else {
        month -= 9;
        year += 1;
    };

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month as u32, day as u32))
        .ok_or_else(|| Error::Format(format!("numeric day {} is out of the calendar range", date)))
}

/// Convert a calendar date to a numeric day.
pub fn encode_date(date: NaiveDate) -> IscDate {
    let day = date.day() as i64;
    let mut month = date.month() as i64;
    let mut year = date.year() as i64;

    if month > 2 {
        month -= 3;
    } else {
        month += 9;
        year -= 1;
    }

    let c = year / 100;
    let ya = year - 100 * c;

    ((146097 * c) / 4 + (1461 * ya) / 4 + (153 * month + 2) / 5 + day + 1721119 - 2400001) as IscDate
}

/// Convert a numeric time to a time of day.
pub fn decode_time(time: IscTime) -> Result<NaiveTime, Error> {
    let mut ntime = time;

    let hours = ntime / (3600 * ibase::ISC_TIME_SECONDS_PRECISION);
    ntime %= 3600 * ibase::ISC_TIME_SECONDS_PRECISION;

    let minutes = ntime / (60 * ibase::ISC_TIME_SECONDS_PRECISION);
    ntime %= 60 * ibase::ISC_TIME_SECONDS_PRECISION;

    let seconds = ntime / ibase::ISC_TIME_SECONDS_PRECISION;

    let fraction = ntime % ibase::ISC_TIME_SECONDS_PRECISION;

    NaiveTime::from_hms_nano_opt(hours, minutes, seconds, fraction * FRACTION_TO_NANOS)
        .ok_or_else(|| Error::Format(format!("numeric time {} is out of the day range", time)))
}

/// Convert a time of day to a numeric time.
pub fn encode_time(time: NaiveTime) -> IscTime {
    let hours = time.hour();
    let minutes = time.minute();
    let seconds = time.second();
    let fraction = time.nanosecond() / FRACTION_TO_NANOS;

    ((hours * 60 + minutes) * 60 + seconds) * ibase::ISC_TIME_SECONDS_PRECISION + fraction
}

pub fn decode_timestamp(ts: IscTimestamp) -> Result<NaiveDateTime, Error> {
    Ok(decode_date(ts.timestamp_date)?.and_time(decode_time(ts.timestamp_time)?))
}

pub fn encode_timestamp(dt: NaiveDateTime) -> IscTimestamp {
    IscTimestamp {
        timestamp_date: encode_date(dt.date()),
        timestamp_time: encode_time(dt.time()),
    }
}

/// Packed size in bytes of a date/time wire type.
pub(crate) fn packed_size(wire_type: WireType) -> Option<usize> {
    match wire_type {
        WireType::Timestamp => Some(8),
        WireType::Date | WireType::Time => Some(4),
        _ => None,
    }
}

/// Write the packed representation of a date/time value.
///
/// Fails with a format error if `wire_type` is not one of the three
/// date/time kinds, and leaves `dst` untouched in that case.
pub fn encode_datetime(
    wire_type: WireType,
    value: NaiveDateTime,
    dst: &mut [u8],
) -> Result<(), Error> {
    let size = packed_size(wire_type).ok_or_else(|| {
        Error::Format(format!(
            "unexpected type of date/time field ({:?})",
            wire_type
        ))
    })?;

    if dst.len() < size {
        return Err(Error::Length(format!(
            "buffer of {} bytes cannot hold a packed {:?}",
            dst.len(),
            wire_type
        )));
    }

    match wire_type {
        WireType::Timestamp => {
            LittleEndian::write_i32(&mut dst[0..4], encode_date(value.date()));
            LittleEndian::write_u32(&mut dst[4..8], encode_time(value.time()));
        }
        WireType::Date => LittleEndian::write_i32(&mut dst[0..4], encode_date(value.date())),
        WireType::Time => LittleEndian::write_u32(&mut dst[0..4], encode_time(value.time())),
        _ => unreachable!(),
    }

    Ok(())
}

/// Read back the packed representation of a date/time value.
///
/// The inverse of [`encode_datetime`], failing with the same format
/// error on a tag that is not a date/time kind. A date-only value
/// carries midnight, a time-only value carries day zero of the wire
/// calendar.
pub fn decode_datetime(wire_type: WireType, src: &[u8]) -> Result<NaiveDateTime, Error> {
    let size = packed_size(wire_type).ok_or_else(|| {
        Error::Format(format!(
            "unexpected type of date/time field ({:?})",
            wire_type
        ))
    })?;

    if src.len() < size {
        return Err(Error::Length(format!(
            "buffer of {} bytes is too short for a packed {:?}",
            src.len(),
            wire_type
        )));
    }

    match wire_type {
        WireType::Timestamp => decode_timestamp(IscTimestamp {
            timestamp_date: LittleEndian::read_i32(&src[0..4]),
            timestamp_time: LittleEndian::read_u32(&src[4..8]),
        }),
        WireType::Date => {
            Ok(decode_date(LittleEndian::read_i32(&src[0..4]))?.and_time(NaiveTime::MIN))
        }
        WireType::Time => Ok(decode_date(0)?.and_time(decode_time(LittleEndian::read_u32(&src[0..4]))?)),
        _ => unreachable!(),
    }
}
