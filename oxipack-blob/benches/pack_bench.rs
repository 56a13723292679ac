//! Benchmarks for format compilation and the pack/unpack walks.

use criterion::{Criterion, criterion_group, criterion_main};
use oxipack_blob::{Format, Value};
use std::hint::black_box;

/// A directive sequence exercising every flag group.
const MIXED_FORMAT: &str = "%2i%ay%bw%p4ld%8s%16y0";

fn gen_format(field_count: usize) -> String {
    let mut text = String::with_capacity(field_count * 3);
    for i in 0..field_count {
        match i % 4 {
            0 => text.push_str("%3i"),
            1 => text.push_str("%ay"),
            2 => text.push_str("%lw"),
            _ => text.push_str("%bd"),
        }
    }
    text
}

fn gen_values(field_count: usize) -> Vec<Value> {
    (0..field_count)
        .map(|i| match i % 4 {
            0 => Value::Bits((i % 8) as u64),
            1 => Value::Byte((i * 31 % 256) as u8),
            2 => Value::Word16((i * 131) as u16),
            _ => Value::Word32((i * 2654435761) as u32),
        })
        .collect()
}

fn bench_compile(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let text = gen_format(field_count);
        c.bench_function(&format!("compile_{}_directives", field_count), |b| {
            b.iter(|| Format::compile(black_box(&text)).unwrap())
        });
    }
}

fn bench_pack(c: &mut Criterion) {
    for &field_count in &[10usize, 100] {
        let format = Format::compile(&gen_format(field_count)).unwrap();
        let values = gen_values(field_count);
        c.bench_function(&format!("pack_{}_fields", field_count), |b| {
            b.iter(|| format.pack(black_box(&values)).unwrap())
        });
    }

    let format = Format::compile(MIXED_FORMAT).unwrap();
    let values = vec![
        Value::Bits(0b10),
        Value::Byte(0x42),
        Value::Word16(0x1234),
        Value::Word32Array(vec![1, 2, 3, 4]),
        Value::Bytes(b"payload".to_vec()),
    ];
    c.bench_function("pack_mixed_format", |b| {
        b.iter(|| format.pack(black_box(&values)).unwrap())
    });
}

fn bench_unpack(c: &mut Criterion) {
    for &field_count in &[10usize, 100] {
        let format = Format::compile(&gen_format(field_count)).unwrap();
        let blob = format.pack(&gen_values(field_count)).unwrap();
        c.bench_function(&format!("unpack_{}_fields", field_count), |b| {
            b.iter(|| format.unpack(black_box(blob.bytes())).unwrap())
        });
    }
}

criterion_group!(benches, bench_compile, bench_pack, bench_unpack);
criterion_main!(benches);
