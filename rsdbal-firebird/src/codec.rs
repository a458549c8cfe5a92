//! Text/numeric column codec
//!
//! Converts between host text representations and the column buffer
//! layouts described by a [`ColumnDesc`].

use byteorder::{ByteOrder, LittleEndian};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    date_time::{decode_datetime, encode_datetime},
    ColumnDesc, WireType,
};
use rsdbal_core::Error;

/// Size in bytes of the varchar length prefix
const VARYING_PREFIX: usize = 2;

/// Allocate a zeroed buffer of the correct size for a column.
///
/// Variable length text needs the declared length plus the length
/// prefix, date/time kinds need their packed size, everything else
/// the declared length. Ownership transfers to the caller.
pub fn alloc_buffer(desc: &ColumnDesc) -> Vec<u8> {
    let size = match desc.wire_type() {
        Ok(WireType::Varying) => desc.len as usize + VARYING_PREFIX,
        Ok(WireType::Timestamp) => 8,
        Ok(WireType::Date) | Ok(WireType::Time) => 4,
        _ => desc.len as usize,
    };

    vec![0; size]
}

/// Write a text representation into a column buffer.
///
/// Dispatches on the column's wire type. On any failure the buffer is
/// left untouched, nothing is partially written.
pub fn set_text_param(desc: &ColumnDesc, buf: &mut [u8], value: &str) -> Result<(), Error> {
    let wire_type = desc.wire_type()?;

    match wire_type {
        WireType::Varying => {
            let bytes = value.as_bytes();
            let capacity = desc.len as usize;
            if bytes.len() > capacity {
                return Err(Error::Length(format!(
                    "value \"{}\" is too long ({} bytes) to be stored in column of size {} bytes",
                    value,
                    bytes.len(),
                    capacity
                )));
            }
            check_buffer(buf, capacity + VARYING_PREFIX, desc)?;

            LittleEndian::write_u16(&mut buf[..VARYING_PREFIX], bytes.len() as u16);
            buf[VARYING_PREFIX..VARYING_PREFIX + bytes.len()].copy_from_slice(bytes);
        }

        WireType::Text => {
            let bytes = value.as_bytes();
            let capacity = desc.len as usize;
            if bytes.len() > capacity {
                return Err(Error::Length(format!(
                    "value \"{}\" is too long ({} bytes) to be stored in column of size {} bytes",
                    value,
                    bytes.len(),
                    capacity
                )));
            }
            check_buffer(buf, capacity, desc)?;

            buf[..bytes.len()].copy_from_slice(bytes);
            for b in &mut buf[bytes.len()..capacity] {
                *b = b' ';
            }
        }

        WireType::Short => {
            let v = parse_scaled(value, desc.scale, i16::MIN as i128, i16::MAX as i128)?;
            check_buffer(buf, 2, desc)?;
            LittleEndian::write_i16(&mut buf[..2], v as i16);
        }

        WireType::Long => {
            let v = parse_scaled(value, desc.scale, i32::MIN as i128, i32::MAX as i128)?;
            check_buffer(buf, 4, desc)?;
            LittleEndian::write_i32(&mut buf[..4], v as i32);
        }

        WireType::Int64 => {
            let v = parse_scaled(value, desc.scale, i64::MIN as i128, i64::MAX as i128)?;
            check_buffer(buf, 8, desc)?;
            LittleEndian::write_i64(&mut buf[..8], v as i64);
        }

        WireType::Timestamp | WireType::Date => {
            let ts = parse_timestamp(value)?;
            encode_datetime(wire_type, ts, buf)?;
        }

        WireType::Time => {
            let time = NaiveTime::parse_from_str(value, "%H:%M:%S")
                .map_err(|_| Error::Parse(format!("could not parse time value \"{}\"", value)))?;
            encode_datetime(WireType::Time, day_zero().and_time(time), buf)?;
        }

        ty => {
            return Err(Error::UnsupportedType(format!(
                "cannot store a text value in a {:?} column",
                ty
            )))
        }
    }

    Ok(())
}

/// Reconstruct the text representation of a column buffer.
///
/// The inverse of [`set_text_param`], dispatching on the same type
/// tag.
pub fn get_text_param(desc: &ColumnDesc, buf: &[u8]) -> Result<String, Error> {
    let wire_type = desc.wire_type()?;

    match wire_type {
        WireType::Varying => {
            check_buffer(buf, VARYING_PREFIX, desc)?;
            let len = LittleEndian::read_u16(&buf[..VARYING_PREFIX]) as usize;
            check_buffer(buf, VARYING_PREFIX + len, desc)?;

            text_from_bytes(&buf[VARYING_PREFIX..VARYING_PREFIX + len])
        }

        WireType::Text => {
            let len = desc.len as usize;
            check_buffer(buf, len, desc)?;

            text_from_bytes(&buf[..len])
        }

        WireType::Short => {
            check_buffer(buf, 2, desc)?;
            Ok(format_decimal(
                LittleEndian::read_i16(&buf[..2]) as i64,
                desc.scale,
            ))
        }

        WireType::Long => {
            check_buffer(buf, 4, desc)?;
            Ok(format_decimal(
                LittleEndian::read_i32(&buf[..4]) as i64,
                desc.scale,
            ))
        }

        WireType::Int64 => {
            check_buffer(buf, 8, desc)?;
            Ok(format_decimal(LittleEndian::read_i64(&buf[..8]), desc.scale))
        }

        WireType::Timestamp => Ok(decode_datetime(wire_type, buf)?
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()),

        WireType::Date => Ok(decode_datetime(wire_type, buf)?.format("%Y-%m-%d").to_string()),

        WireType::Time => Ok(decode_datetime(wire_type, buf)?.format("%H:%M:%S").to_string()),

        ty => Err(Error::UnsupportedType(format!(
            "cannot read a text value from a {:?} column",
            ty
        ))),
    }
}

/// Render a scaled integer with the implied decimal point re-inserted.
pub fn format_decimal(value: i64, scale: i16) -> String {
    let frac_digits = (-scale).max(0) as usize;
    if frac_digits == 0 {
        return value.to_string();
    }

    let mut digits = value.unsigned_abs().to_string();
    if digits.len() <= frac_digits {
        let mut padded = "0".repeat(frac_digits + 1 - digits.len());
        padded.push_str(&digits);
        digits = padded;
    }

    let split = digits.len() - frac_digits;
    format!(
        "{}{}.{}",
        if value < 0 { "-" } else { "" },
        &digits[..split],
        &digits[split..]
    )
}

fn check_buffer(buf: &[u8], needed: usize, desc: &ColumnDesc) -> Result<(), Error> {
    if buf.len() < needed {
        return Err(Error::Length(format!(
            "buffer of {} bytes is too small for column (sqltype {}, {} bytes needed)",
            buf.len(),
            desc.sqltype,
            needed
        )));
    }

    Ok(())
}

fn text_from_bytes(bytes: &[u8]) -> Result<String, Error> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Format(format!("column holds an invalid utf-8 string: {}", e)))
}

/// Day zero of the wire calendar, used as the date part of time-only
/// values.
fn day_zero() -> NaiveDate {
    NaiveDate::from_ymd_opt(1858, 11, 17).unwrap()
}

/// Accepted timestamp spellings, tried in order: date and time split
/// by a space, by a 'T', or a bare date meaning midnight.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| Error::Parse(format!("could not parse timestamp value \"{}\"", value)))
}

/// Parse decimal text into a scaled integer honoring the declared
/// scale, then range-check it against the column width.
fn parse_scaled(value: &str, scale: i16, min: i128, max: i128) -> Result<i128, Error> {
    let frac_digits = (-scale).max(0) as usize;
    let trimmed = value.trim();

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(Error::Parse(format!("could not parse number \"{}\"", value)));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::Parse(format!("could not parse number \"{}\"", value)));
    }
    if frac_part.len() > frac_digits {
        return Err(Error::Parse(format!(
            "value \"{}\" has more fractional digits than the column scale ({}) admits",
            value, frac_digits
        )));
    }

    let mut scaled: i128 = 0;
    let zeros = frac_digits - frac_part.len();
    for b in int_part.bytes().chain(frac_part.bytes()) {
        scaled = scaled
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i128))
            .ok_or_else(|| Error::Parse(format!("value \"{}\" is out of range", value)))?;
    }
    for _ in 0..zeros {
        scaled = scaled
            .checked_mul(10)
            .ok_or_else(|| Error::Parse(format!("value \"{}\" is out of range", value)))?;
    }
    if negative {
        scaled = -scaled;
    }

    if scaled < min || scaled > max {
        return Err(Error::Parse(format!(
            "value \"{}\" does not fit the column width",
            value
        )));
    }

    Ok(scaled)
}
