//! The read path: a packed buffer back into values.
//!
//! Mirrors the write path exactly: the same alignment, quantity, endianness,
//! and width rules decide how many bits each directive consumes and how
//! they reassemble into a value. Fill directives consume and discard their
//! width; literal runs are skipped byte-aligned. A directive that would
//! read past the end of the buffer fails the whole call; no partial value
//! list escapes.

use oxipack_core::bitstream::BitReader;
use oxipack_core::endian::emission_word;
use oxipack_core::error::Result;

use crate::compile::Format;
use crate::directive::{Directive, FieldSpec, FieldType, SourceKind, bit_run_value};
use crate::value::Value;

pub(crate) fn run(format: &Format, data: &[u8]) -> Result<Vec<Value>> {
    let mut reader = BitReader::new(data);
    let mut out = Vec::with_capacity(format.value_count());

    for directive in format.directives() {
        match directive {
            Directive::Literal(bytes) => {
                reader.align_to_byte();
                reader.skip_bits(bytes.len() * 8)?;
            }
            Directive::Field(spec) => {
                if spec.aligned {
                    reader.align_to_byte();
                }
                if spec.consumes_value() {
                    out.push(read_value(&mut reader, spec)?);
                } else {
                    reader.skip_bits(spec.total_bits())?;
                }
            }
        }
    }

    Ok(out)
}

fn read_value(reader: &mut BitReader<'_>, spec: &FieldSpec) -> Result<Value> {
    let value = match spec.ty {
        FieldType::Bit => match spec.source {
            SourceKind::Scalar => {
                let count = spec.quantity as u32;
                let raw = reader.read_bits(count)?;
                Value::Bits(bit_run_value(raw, count, spec.order))
            }
            SourceKind::Array => {
                let mut bits = Vec::with_capacity(spec.quantity);
                for _ in 0..spec.quantity {
                    bits.push(reader.read_bits(1)? != 0);
                }
                Value::BitArray(bits)
            }
        },
        FieldType::Byte => match spec.source {
            SourceKind::Scalar => Value::Byte(reader.read_bits(8)? as u8),
            SourceKind::Array => {
                let mut out = Vec::with_capacity(spec.quantity);
                for _ in 0..spec.quantity {
                    out.push(reader.read_bits(8)? as u8);
                }
                Value::ByteArray(out)
            }
        },
        FieldType::Word16 => match spec.source {
            SourceKind::Scalar => Value::Word16(read_word(reader, spec)? as u16),
            SourceKind::Array => {
                let mut out = Vec::with_capacity(spec.quantity);
                for _ in 0..spec.quantity {
                    out.push(read_word(reader, spec)? as u16);
                }
                Value::Word16Array(out)
            }
        },
        FieldType::Word32 => match spec.source {
            SourceKind::Scalar => Value::Word32(read_word(reader, spec)? as u32),
            SourceKind::Array => {
                let mut out = Vec::with_capacity(spec.quantity);
                for _ in 0..spec.quantity {
                    out.push(read_word(reader, spec)? as u32);
                }
                Value::Word32Array(out)
            }
        },
        FieldType::Word64 => match spec.source {
            SourceKind::Scalar => Value::Word64(read_word(reader, spec)?),
            SourceKind::Array => {
                let mut out = Vec::with_capacity(spec.quantity);
                for _ in 0..spec.quantity {
                    out.push(read_word(reader, spec)?);
                }
                Value::Word64Array(out)
            }
        },
        FieldType::Str => Value::Bytes(reader.read_bytes(spec.quantity)?),
    };
    Ok(value)
}

/// Read one multi-byte word, undoing the directive's byte order.
fn read_word(reader: &mut BitReader<'_>, spec: &FieldSpec) -> Result<u64> {
    let raw = reader.read_bits(spec.ty.element_bits())?;
    Ok(emission_word(raw, spec.ty.element_bytes(), spec.order))
}
