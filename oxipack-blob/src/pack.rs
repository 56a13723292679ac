//! The write path: directive sequence plus values into a packed [`Blob`].
//!
//! The walk is a single pass over the compiled directives with a
//! forward-only bit cursor. Arguments are validated as a whole before the
//! first bit is emitted, so an invalid call never allocates a partial
//! buffer for the caller to see.

use oxipack_core::bitstream::BitWriter;
use oxipack_core::endian::emission_word;
use oxipack_core::entropy::EntropySource;
use oxipack_core::error::{OxiPackError, Result};

use crate::blob::Blob;
use crate::compile::Format;
use crate::directive::{Directive, FieldSpec, FieldType, Fill, bit_run_emission, low_mask};
use crate::value::Value;

pub(crate) fn run<E: EntropySource>(
    format: &Format,
    values: &[Value],
    entropy: &mut E,
) -> Result<Blob> {
    format.check_arguments(values)?;

    let mut writer = BitWriter::with_capacity(format.byte_len());
    let mut index = 0usize;

    for directive in format.directives() {
        match directive {
            Directive::Literal(bytes) => {
                writer.align_to_byte();
                writer.write_bytes(bytes);
            }
            Directive::Field(spec) => {
                if spec.aligned {
                    writer.align_to_byte();
                }
                if spec.consumes_value() {
                    write_value(&mut writer, spec, index, &values[index])?;
                    index += 1;
                } else {
                    write_fill(&mut writer, spec, entropy);
                }
            }
        }
    }

    let (bytes, bit_len) = writer.finish();
    Ok(Blob::new(bytes, bit_len))
}

/// Emit one supplied value. The kinds were validated up front; the fallback
/// arm re-reports a mismatch rather than trusting the caller.
fn write_value(writer: &mut BitWriter, spec: &FieldSpec, index: usize, value: &Value) -> Result<()> {
    match (spec.ty, value) {
        (FieldType::Bit, Value::Bits(v)) => {
            let count = spec.quantity as u32;
            writer.write_bits(bit_run_emission(*v, count, spec.order), count);
        }
        (FieldType::Bit, Value::BitArray(bits)) => {
            for &bit in bits {
                writer.write_bit(bit);
            }
        }
        (FieldType::Byte, Value::Byte(v)) => {
            writer.write_bits(u64::from(*v), 8);
        }
        (FieldType::Byte, Value::ByteArray(vs)) => {
            for &v in vs {
                writer.write_bits(u64::from(v), 8);
            }
        }
        (FieldType::Word16, Value::Word16(v)) => write_word(writer, u64::from(*v), spec),
        (FieldType::Word16, Value::Word16Array(vs)) => {
            for &v in vs {
                write_word(writer, u64::from(v), spec);
            }
        }
        (FieldType::Word32, Value::Word32(v)) => write_word(writer, u64::from(*v), spec),
        (FieldType::Word32, Value::Word32Array(vs)) => {
            for &v in vs {
                write_word(writer, u64::from(v), spec);
            }
        }
        (FieldType::Word64, Value::Word64(v)) => write_word(writer, *v, spec),
        (FieldType::Word64, Value::Word64Array(vs)) => {
            for &v in vs {
                write_word(writer, v, spec);
            }
        }
        (FieldType::Str, Value::Bytes(s)) => {
            let len = s.len().min(spec.quantity);
            writer.write_bytes(&s[..len]);
            for _ in len..spec.quantity {
                writer.write_bits(0, 8);
            }
        }
        (_, other) => {
            return Err(OxiPackError::argument_kind(
                index,
                spec.expected_kind().name(),
                other.kind().name(),
            ));
        }
    }
    Ok(())
}

/// Emit one multi-byte word in the directive's byte order.
fn write_word(writer: &mut BitWriter, value: u64, spec: &FieldSpec) {
    let width = spec.ty.element_bytes();
    writer.write_bits(
        emission_word(value, width, spec.order),
        spec.ty.element_bits(),
    );
}

/// Emit a synthesized field: zeros, ones, or entropy-drawn bits. The
/// synthesized element flows through the same emission path a supplied
/// scalar would.
fn write_fill<E: EntropySource>(writer: &mut BitWriter, spec: &FieldSpec, entropy: &mut E) {
    if spec.ty == FieldType::Bit {
        let count = spec.quantity as u32;
        let v = match spec.fill {
            Fill::Zeros | Fill::None => 0,
            Fill::Ones => low_mask(count),
            Fill::Random => entropy.next_bits(count),
        };
        writer.write_bits(bit_run_emission(v, count, spec.order), count);
        return;
    }

    let bits = spec.ty.element_bits();
    for _ in 0..spec.quantity {
        let v = match spec.fill {
            Fill::Zeros | Fill::None => 0,
            Fill::Ones => low_mask(bits),
            Fill::Random => entropy.next_bits(bits),
        };
        if spec.ty == FieldType::Byte {
            writer.write_bits(v, 8);
        } else {
            write_word(writer, v, spec);
        }
    }
}
