//! The directive compiler: format strings into compiled [`Format`]s.
//!
//! A format string is scanned left to right in a single greedy pass. Every
//! `%` escape yields one [`FieldSpec`]; characters between escapes collect
//! into raw literal runs. All validation happens here, before any bit is
//! written or read, so a malformed format never produces a partial buffer.
//!
//! # Directive syntax
//!
//! ```text
//! %[p][n][a][l|b]{i,y,w,d,q,s}[0|1|r]
//! ```
//!
//! - `p` - the value is one array reference of `n` elements
//! - `n` - quantity: repetition count, bit-run length for `i`, byte length
//!   for `s`
//! - `a` - align the cursor to the next byte boundary first
//! - `l` / `b` - little / big endian byte order (no conversion by default)
//! - type - `i` bit, `y` byte, `w` 2 byte word, `d` 4 byte word, `q` 8 byte
//!   word, `s` string without termination (use length+1 in quantity to null)
//! - `0` / `1` / `r` - fill the field with zeros, ones, or random bits
//!   instead of consuming a value
//!
//! Some examples:
//!
//! ```text
//! %p4lw  one array of four little endian 2 byte words
//! %2i    two bits 'ab' from value 0b000000ab
//! %2bi   two bits 'ab' from value 0b000000ba
//! %2li   two bits 'ab' from value 0bab000000
//! %16y0  sixteen zero bytes, no value consumed
//! ```

use oxipack_core::endian::ByteOrder;
use oxipack_core::entropy::EntropySource;
use oxipack_core::error::{OxiPackError, Result};

use crate::blob::Blob;
use crate::directive::{Directive, FieldSpec, FieldType, Fill, SourceKind};
use crate::value::Value;
use crate::{pack, unpack};

/// A compiled format: the directive sequence plus derived totals.
///
/// Compile once with [`Format::compile`], then run [`Format::pack`] /
/// [`Format::unpack`] any number of times; a `Format` is immutable and
/// carries no per-call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    directives: Vec<Directive>,
    bit_len: usize,
    value_count: usize,
}

impl Format {
    /// Compile a format string into a directive sequence.
    ///
    /// Fails on the first syntactically or semantically invalid directive.
    /// The empty string compiles to an empty sequence.
    pub fn compile(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        let mut directives = Vec::new();
        let mut literal: Vec<u8> = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'%' {
                literal.push(bytes[i]);
                i += 1;
                continue;
            }
            if !literal.is_empty() {
                directives.push(Directive::Literal(std::mem::take(&mut literal)));
            }
            let spec = parse_field(bytes, &mut i)?;
            directives.push(Directive::Field(spec));
        }
        if !literal.is_empty() {
            directives.push(Directive::Literal(literal));
        }

        let bit_len = packed_bit_len(&directives);
        let value_count = directives
            .iter()
            .filter(|d| matches!(d, Directive::Field(f) if f.consumes_value()))
            .count();

        Ok(Self {
            directives,
            bit_len,
            value_count,
        })
    }

    /// The compiled directive sequence, in format-string order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Total bit length of a packed buffer, alignment padding included.
    ///
    /// Alignment padding depends only on the cursor position, which is
    /// determined by the preceding directives, so the total is a static
    /// property of the format.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Byte length of a packed buffer: `ceil(bit_len / 8)`.
    pub fn byte_len(&self) -> usize {
        self.bit_len.div_ceil(8)
    }

    /// Number of values the format consumes (and produces on unpack).
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// Validate an argument list against this format without executing.
    ///
    /// Checks arity, the kind of every value, and the length of every array
    /// reference. [`Format::pack`] calls this before touching any bit.
    pub fn check_arguments(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.value_count {
            return Err(OxiPackError::argument_count(self.value_count, values.len()));
        }

        let mut index = 0;
        for directive in &self.directives {
            let Directive::Field(spec) = directive else {
                continue;
            };
            if !spec.consumes_value() {
                continue;
            }
            let value = &values[index];
            let expected = spec.expected_kind();
            if value.kind() != expected {
                return Err(OxiPackError::argument_kind(
                    index,
                    expected.name(),
                    value.kind().name(),
                ));
            }
            if spec.source == SourceKind::Array {
                let found = value.array_len().unwrap_or(0);
                if found != spec.quantity {
                    return Err(OxiPackError::array_length(index, spec.quantity, found));
                }
            }
            index += 1;
        }
        Ok(())
    }

    /// Pack `values` into a fresh [`Blob`], drawing `r` fills from the
    /// thread-local generator.
    pub fn pack(&self, values: &[Value]) -> Result<Blob> {
        self.pack_with(values, &mut rand::thread_rng())
    }

    /// Pack `values` with an explicit entropy source for `r` fills.
    pub fn pack_with<E: EntropySource>(&self, values: &[Value], entropy: &mut E) -> Result<Blob> {
        pack::run(self, values, entropy)
    }

    /// Pack `values` and append the bytes to a caller-supplied buffer.
    ///
    /// Returns the number of bytes appended. Useful when assembling several
    /// packed records into one outgoing buffer.
    pub fn pack_into<E: EntropySource>(
        &self,
        values: &[Value],
        entropy: &mut E,
        out: &mut Vec<u8>,
    ) -> Result<usize> {
        let blob = self.pack_with(values, entropy)?;
        out.extend_from_slice(blob.bytes());
        Ok(blob.byte_len())
    }

    /// Unpack `data`, producing one [`Value`] per value-consuming directive
    /// in directive order.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>> {
        unpack::run(self, data)
    }
}

/// Parse one `%` escape. `i` points at the `%` on entry and one past the
/// directive on exit.
fn parse_field(bytes: &[u8], i: &mut usize) -> Result<FieldSpec> {
    let escape_pos = *i;
    *i += 1;

    let pointer = take(bytes, i, b'p');

    let mut quantity: Option<usize> = None;
    while let Some(digit @ b'0'..=b'9') = bytes.get(*i).copied() {
        let next = quantity
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|q| q.checked_add(usize::from(digit - b'0')))
            .ok_or_else(|| OxiPackError::format(*i, "quantity out of range"))?;
        quantity = Some(next);
        *i += 1;
    }

    let aligned = take(bytes, i, b'a');

    let order = if take(bytes, i, b'l') {
        ByteOrder::Little
    } else if take(bytes, i, b'b') {
        ByteOrder::Big
    } else {
        ByteOrder::Native
    };

    let ty = match bytes.get(*i).copied() {
        None => {
            return Err(OxiPackError::format(
                escape_pos,
                "dangling '%' escape with no type character",
            ));
        }
        Some(b'i') => FieldType::Bit,
        Some(b'y') => FieldType::Byte,
        Some(b'w') => FieldType::Word16,
        Some(b'd') => FieldType::Word32,
        Some(b'q') => FieldType::Word64,
        Some(b's') => FieldType::Str,
        Some(other) => {
            return Err(OxiPackError::unknown_type(char::from(other), *i));
        }
    };
    *i += 1;

    let fill = if take(bytes, i, b'0') {
        Fill::Zeros
    } else if take(bytes, i, b'1') {
        Fill::Ones
    } else if take(bytes, i, b'r') {
        Fill::Random
    } else {
        Fill::None
    };

    if quantity == Some(0) {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "quantity must be positive",
        ));
    }
    let quantity = quantity.unwrap_or(1);

    if fill != Fill::None && ty == FieldType::Str {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "string fields cannot be synthesized",
        ));
    }
    if fill != Fill::None && pointer {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "fill directives consume no argument",
        ));
    }
    if pointer && ty == FieldType::Str {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "string values carry their own length",
        ));
    }
    if ty == FieldType::Bit && quantity > 64 {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "bit run exceeds 64 bits",
        ));
    }
    if pointer && ty == FieldType::Bit && order != ByteOrder::Native {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "bit arrays are emitted in element order and have no byte order",
        ));
    }
    if quantity > 1
        && !matches!(ty, FieldType::Bit | FieldType::Str)
        && !pointer
        && fill == Fill::None
    {
        return Err(OxiPackError::invalid_directive(
            escape_pos,
            "repeated fields need the 'p' array flag",
        ));
    }

    Ok(FieldSpec {
        ty,
        quantity,
        order,
        aligned,
        fill,
        source: if pointer {
            SourceKind::Array
        } else {
            SourceKind::Scalar
        },
    })
}

/// Consume `expected` at the cursor if present.
fn take(bytes: &[u8], i: &mut usize, expected: u8) -> bool {
    if bytes.get(*i) == Some(&expected) {
        *i += 1;
        true
    } else {
        false
    }
}

/// Walk the sequence with a simulated cursor to find the packed bit length.
fn packed_bit_len(directives: &[Directive]) -> usize {
    let mut cursor = 0usize;
    for directive in directives {
        match directive {
            Directive::Literal(bytes) => {
                cursor = cursor.div_ceil(8) * 8 + bytes.len() * 8;
            }
            Directive::Field(spec) => {
                if spec.aligned {
                    cursor = cursor.div_ceil(8) * 8;
                }
                cursor += spec.total_bits();
            }
        }
    }
    cursor
}
