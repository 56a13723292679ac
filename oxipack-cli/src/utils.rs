//! Utility functions for the CLI.

use oxipack_blob::{FieldSpec, Value, ValueKind};

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a hex string (whitespace tolerated) into bytes.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(format!("hex string has odd length {}", compact.len()).into());
    }
    let mut out = Vec::with_capacity(compact.len() / 2);
    for chunk in compact.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(chunk)?;
        out.push(u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex pair '{pair}'"))?);
    }
    Ok(out)
}

/// Parse an unsigned integer with optional `0x`/`0o`/`0b` prefix.
pub fn parse_int(text: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else if let Some(oct) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        u64::from_str_radix(oct, 8)
    } else {
        text.parse()
    };
    parsed.map_err(|_| format!("invalid integer '{text}'").into())
}

fn parse_int_list(text: &str) -> Result<Vec<u64>, Box<dyn std::error::Error>> {
    text.split(',').map(|part| parse_int(part.trim())).collect()
}

fn narrow<T: TryFrom<u64>>(value: u64, kind: &str) -> Result<T, Box<dyn std::error::Error>> {
    T::try_from(value).map_err(|_| format!("value {value:#x} out of range for {kind}").into())
}

/// Parse one command-line argument into the value a directive consumes.
///
/// Integers accept `0x`/`0o`/`0b` prefixes; arrays are comma-separated;
/// bit arrays accept `0`/`1`; strings are taken as raw bytes.
pub fn parse_value(spec: &FieldSpec, raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let value = match spec.expected_kind() {
        ValueKind::Bits => Value::Bits(parse_int(raw)?),
        ValueKind::Byte => Value::Byte(narrow(parse_int(raw)?, "byte")?),
        ValueKind::Word16 => Value::Word16(narrow(parse_int(raw)?, "word16")?),
        ValueKind::Word32 => Value::Word32(narrow(parse_int(raw)?, "word32")?),
        ValueKind::Word64 => Value::Word64(parse_int(raw)?),
        ValueKind::Bytes => Value::Bytes(raw.as_bytes().to_vec()),
        ValueKind::BitArray => {
            let mut bits = Vec::new();
            for part in raw.split(',') {
                bits.push(match part.trim() {
                    "0" => false,
                    "1" => true,
                    other => return Err(format!("invalid bit '{other}'").into()),
                });
            }
            Value::BitArray(bits)
        }
        ValueKind::ByteArray => Value::ByteArray(
            parse_int_list(raw)?
                .into_iter()
                .map(|v| narrow(v, "byte"))
                .collect::<Result<_, _>>()?,
        ),
        ValueKind::Word16Array => Value::Word16Array(
            parse_int_list(raw)?
                .into_iter()
                .map(|v| narrow(v, "word16"))
                .collect::<Result<_, _>>()?,
        ),
        ValueKind::Word32Array => Value::Word32Array(
            parse_int_list(raw)?
                .into_iter()
                .map(|v| narrow(v, "word32"))
                .collect::<Result<_, _>>()?,
        ),
        ValueKind::Word64Array => Value::Word64Array(parse_int_list(raw)?),
    };
    Ok(value)
}

/// Render one unpacked value for the plain-text output mode.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Bits(v) => format!("bits {v:#b}"),
        Value::Byte(v) => format!("byte {v:#04x} ({v})"),
        Value::Word16(v) => format!("word16 {v:#06x} ({v})"),
        Value::Word32(v) => format!("word32 {v:#010x} ({v})"),
        Value::Word64(v) => format!("word64 {v:#018x} ({v})"),
        Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) if text.chars().all(|c| !c.is_control() || c == '\0') => {
                format!("string {:?}", text.trim_end_matches('\0'))
            }
            _ => format!("string 0x{}", to_hex(bytes)),
        },
        Value::BitArray(bits) => {
            let run: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
            format!("bits [{run}]")
        }
        Value::ByteArray(vs) => format!("byte array {vs:02x?}"),
        Value::Word16Array(vs) => format!("word16 array {vs:04x?}"),
        Value::Word32Array(vs) => format!("word32 array {vs:08x?}"),
        Value::Word64Array(vs) => format!("word64 array {vs:016x?}"),
    }
}
