//! # OxiPack Core
//!
//! Core components for the OxiPack bit-level packing library.
//!
//! This crate provides the fundamental building blocks the directive engine
//! is built on:
//!
//! - [`bitstream`]: MSB-first bit-level reads and writes over byte buffers
//! - [`endian`]: byte order resolution and bit/byte reordering
//! - [`entropy`]: injected randomness for fill directives
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! OxiPack is designed as a small layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     oxipack pack/unpack/inspect                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Directive engine (oxipack-blob)                     │
//! │     Format compiler, pack/unpack walks, Value model     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, ByteOrder, EntropySource       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::bitstream::{BitReader, BitWriter};
//! use oxipack_core::endian::{ByteOrder, emission_word};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(emission_word(0x1234, 2, ByteOrder::Big), 16);
//! let (bytes, _) = writer.finish();
//! assert_eq!(bytes, vec![0x12, 0x34]);
//!
//! let mut reader = BitReader::new(&bytes);
//! let raw = reader.read_bits(16).unwrap();
//! assert_eq!(emission_word(raw, 2, ByteOrder::Big), 0x1234);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod endian;
pub mod entropy;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use endian::{ByteOrder, NATIVE_ORDER};
pub use entropy::EntropySource;
pub use error::{OxiPackError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::endian::{ByteOrder, NATIVE_ORDER};
    pub use crate::entropy::EntropySource;
    pub use crate::error::{OxiPackError, Result};
}
