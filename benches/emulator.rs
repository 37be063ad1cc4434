//! Emulator benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scriptgif_core::{Diagnostics, Dimensions, Terminal};
use scriptgif_parser::Parser;

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let mixed = "Line 1: \x1b[32mOK\x1b[0m\r\nLine 2: \x1b[31mERROR\x1b[0m\r\n".repeat(500);
    group.throughput(Throughput::Bytes(mixed.len() as u64));

    group.bench_function("mixed_content", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let actions = parser.parse_collect(black_box(mixed.as_bytes()));
            black_box(actions)
        })
    });

    let utf8 = "日本語テキスト ─│┌┐ ".repeat(500);
    group.throughput(Throughput::Bytes(utf8.len() as u64));

    group.bench_function("utf8", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let actions = parser.parse_collect(black_box(utf8.as_bytes()));
            black_box(actions)
        })
    });

    group.finish();
}

fn bench_terminal(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    // Scrolling output, like `cat` on a long file
    let scrolling = "the quick brown fox jumps over the lazy dog\r\n".repeat(2000);
    group.throughput(Throughput::Bytes(scrolling.len() as u64));

    group.bench_function("scrolling_text", |b| {
        b.iter(|| {
            let mut term = Terminal::new(Dimensions::new(80, 24), Diagnostics::quiet());
            term.feed_bytes(black_box(scrolling.as_bytes()));
            black_box(term.snapshot().cursor())
        })
    });

    // Full-screen redraws with a scroll region, like an editor or pager
    let mut redraw = String::new();
    for i in 0..200 {
        redraw.push_str("\x1b[H\x1b[2J\x1b[1;23r");
        for row in 1..=23 {
            redraw.push_str(&format!("\x1b[{};1H\x1b[3{}m{:>4} line\x1b[m", row, row % 8, i));
        }
        redraw.push_str("\x1b[24;1H\x1b[7m-- status --\x1b[m\x1b[r");
    }
    group.throughput(Throughput::Bytes(redraw.len() as u64));

    group.bench_function("full_screen_redraw", |b| {
        b.iter(|| {
            let mut term = Terminal::new(Dimensions::new(80, 24), Diagnostics::quiet());
            term.feed_bytes(black_box(redraw.as_bytes()));
            black_box(term.snapshot().cursor())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parser, bench_terminal);
criterion_main!(benches);
