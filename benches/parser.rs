//! Decoder benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pager_source::parser::Decoder;

fn bench_decode_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Plain ASCII text
    let plain_text = "Hello, World! ".repeat(1000);
    group.throughput(Throughput::Bytes(plain_text.len() as u64));

    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            decoder.feed_str(black_box(&plain_text));
            black_box(decoder.drain())
        })
    });

    group.finish();
}

fn bench_decode_sgr(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Colored output, including 256-color and truecolor sequences
    let sgr_heavy = "\x1b[1;31mRed\x1b[0m \x1b[38;5;208mOrange\x1b[48;2;10;20;30m bg\x1b[m\n".repeat(100);
    group.throughput(Throughput::Bytes(sgr_heavy.len() as u64));

    group.bench_function("sgr_sequences", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            decoder.feed_str(black_box(&sgr_heavy));
            black_box(decoder.drain())
        })
    });

    group.finish();
}

fn bench_decode_manpage(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // nroff-style overstrike
    let manpage = "N\x08NA\x08AM\x08ME\x08E\n     _\x08l_\x08s - list directory contents\n".repeat(500);
    group.throughput(Throughput::Bytes(manpage.len() as u64));

    group.bench_function("manpage_overstrike", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            decoder.feed_str(black_box(&manpage));
            black_box(decoder.drain())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_plain_text,
    bench_decode_sgr,
    bench_decode_manpage
);

criterion_main!(benches);
