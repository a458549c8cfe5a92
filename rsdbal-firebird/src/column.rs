//! Column descriptors, the XSQLVAR equivalent

use num_enum::TryFromPrimitive;

use rsdbal_core::Error;

/// Wire type tags used by the firebird client API.
///
/// The raw sqltype carries the nullable flag in its low bit, mask it
/// off before comparing (see [`ColumnDesc::wire_type`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(i32)]
pub enum WireType {
    Varying = 448,
    Text = 452,
    Double = 480,
    Float = 482,
    Long = 496,
    Short = 500,
    Timestamp = 510,
    Blob = 520,
    Time = 560,
    Date = 570,
    Int64 = 580,
    Boolean = 32764,
}

/// Describes one column's wire type, declared length and scale.
///
/// Not owned beyond the enclosing statement's lifetime. The codec
/// selects its encode/decode strategy from this descriptor, never
/// from the buffer contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDesc {
    /// Raw sqltype, low bit = nullable flag
    pub sqltype: i16,
    pub subtype: i16,
    /// Declared length in bytes
    pub len: i16,
    /// Scale, zero or negative: digits after the implied decimal point
    pub scale: i16,
}

impl ColumnDesc {
    pub fn new(wire_type: WireType, len: i16, scale: i16) -> Self {
        ColumnDesc {
            sqltype: wire_type as i16,
            subtype: 0,
            len,
            scale,
        }
    }

    /// The wire type with the nullable flag masked off.
    pub fn wire_type(&self) -> Result<WireType, Error> {
        let masked = (self.sqltype & !1) as i32;

        WireType::try_from(masked)
            .map_err(|_| Error::UnsupportedType(format!("unknown firebird wire type ({})", masked)))
    }
}

#[cfg(test)]
mod test {
    use super::{ColumnDesc, WireType};
    use rsdbal_core::Error;

    #[test]
    fn nullable_flag_is_masked() -> Result<(), Error> {
        let desc = ColumnDesc {
            sqltype: WireType::Varying as i16 + 1,
            subtype: 0,
            len: 10,
            scale: 0,
        };

        assert_eq!(WireType::Varying, desc.wire_type()?);

        Ok(())
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let desc = ColumnDesc {
            sqltype: 9999,
            subtype: 0,
            len: 0,
            scale: 0,
        };

        assert!(matches!(
            desc.wire_type(),
            Err(Error::UnsupportedType(_))
        ));
    }
}
