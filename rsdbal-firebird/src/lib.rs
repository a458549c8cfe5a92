//! Firebird wire-format type codec
//!
//! The firebird client API hands values around as untyped byte buffers
//! scoped to the metadata of each column. Every access re-derives size
//! and encoding from the [`ColumnDesc`] at the point of use, there is
//! no schema cache. Descriptor and buffer always travel together.

mod blob;
mod codec;
mod column;
pub mod date_time;
pub mod ibase;

pub use blob::{materialize_blob, BlobApi};
pub use codec::{alloc_buffer, format_decimal, get_text_param, set_text_param};
pub use column::{ColumnDesc, WireType};
pub use date_time::{decode_datetime, encode_datetime};
pub use rsdbal_core::Error;
