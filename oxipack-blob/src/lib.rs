//! # OxiPack Blob
//!
//! Directive-driven bit-level packing and unpacking of binary blobs.
//!
//! A short format string describes a sequence of fields - bit width,
//! endianness, alignment, fill pattern, repetition count, scalar or array
//! source - and the engine packs supplied values into a byte buffer at
//! sub-byte granularity, or extracts them back out. Think of it as a
//! `printf`/`struct.pack` hybrid that operates on bits rather than bytes.
//!
//! ## Directive syntax
//!
//! ```text
//! %[p][n][a][l|b]{i,y,w,d,q,s}[0|1|r]
//! ```
//!
//! See [`Format`] for the full grammar. Packing and unpacking are driven by
//! the same compiled directive sequence, so the two directions agree by
//! construction.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_blob::{Format, Value, pack, unpack};
//!
//! // A 2-bit flag field, an aligned byte, and a big-endian word.
//! let blob = pack(
//!     "%2i%ay%bw",
//!     &[Value::Bits(0b10), Value::Byte(0x7F), Value::Word16(0x1234)],
//! )
//! .unwrap();
//! assert_eq!(blob.bytes(), &[0b1000_0000, 0x7F, 0x12, 0x34]);
//!
//! let values = unpack("%2i%ay%bw", blob.bytes()).unwrap();
//! assert_eq!(
//!     values,
//!     vec![Value::Bits(0b10), Value::Byte(0x7F), Value::Word16(0x1234)]
//! );
//!
//! // Compile once, reuse across calls.
//! let format = Format::compile("%4s%d0").unwrap();
//! assert_eq!(format.byte_len(), 8);
//! assert_eq!(format.value_count(), 1);
//! ```
//!
//! Every call is a pure function of its inputs: no state persists between
//! calls, and concurrent calls need no coordination. The one injected
//! capability is the entropy source behind `r` fills - see
//! [`pack_with`] and [`oxipack_core::entropy::EntropySource`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod blob;
pub mod compile;
pub mod directive;
mod pack;
mod unpack;
pub mod value;

// Re-exports
pub use blob::Blob;
pub use compile::Format;
pub use directive::{Directive, FieldSpec, FieldType, Fill, SourceKind};
pub use oxipack_core::endian::ByteOrder;
pub use oxipack_core::entropy::EntropySource;
pub use oxipack_core::error::{OxiPackError, Result};
pub use value::{Value, ValueKind};

/// Compile `format` and pack `values` into a fresh [`Blob`].
///
/// `r` fills draw from the thread-local generator; use [`pack_with`] to
/// inject a deterministic source.
pub fn pack(format: &str, values: &[Value]) -> Result<Blob> {
    Format::compile(format)?.pack(values)
}

/// Compile `format` and pack `values` with an explicit entropy source.
pub fn pack_with<E: EntropySource>(format: &str, values: &[Value], entropy: &mut E) -> Result<Blob> {
    Format::compile(format)?.pack_with(values, entropy)
}

/// Compile `format` and unpack `data` into one [`Value`] per
/// value-consuming directive, in directive order.
pub fn unpack(format: &str, data: &[u8]) -> Result<Vec<Value>> {
    Format::compile(format)?.unpack(data)
}
