//! GIF encoder benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scriptgif_core::Palette;
use scriptgif_gif::GifEncoder;

const WIDTH: usize = 480;
const HEIGHT: usize = 240;

fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) & 0x0F) as u8
        })
        .collect()
}

fn bench_encoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoder");
    let palette = Palette::default().to_bytes();
    group.throughput(Throughput::Bytes((WIDTH * HEIGHT) as u64));

    let frame = noise(WIDTH * HEIGHT, 1);
    group.bench_function("full_frame_noise", |b| {
        b.iter(|| {
            let mut gif = GifEncoder::open(Vec::new(), WIDTH, HEIGHT, &palette, Some(0))
                .unwrap_or_else(|e| panic!("{}", e));
            gif.current_mut().copy_from_slice(black_box(&frame));
            let _ = gif.add_frame(10);
            black_box(gif.close().map(|out| out.len()).ok())
        })
    });

    // Text-like frames: long runs of background with sparse glyph pixels
    let text: Vec<u8> = (0..WIDTH * HEIGHT)
        .map(|i| if i % 7 == 0 || i % 11 == 0 { 7 } else { 0 })
        .collect();
    group.bench_function("full_frame_text", |b| {
        b.iter(|| {
            let mut gif = GifEncoder::open(Vec::new(), WIDTH, HEIGHT, &palette, None)
                .unwrap_or_else(|e| panic!("{}", e));
            gif.current_mut().copy_from_slice(black_box(&text));
            let _ = gif.add_frame(10);
            black_box(gif.close().map(|out| out.len()).ok())
        })
    });

    // Typing: each frame changes one cell-sized block
    group.bench_function("small_dirty_rects", |b| {
        b.iter(|| {
            let mut gif = GifEncoder::open(Vec::new(), WIDTH, HEIGHT, &palette, None)
                .unwrap_or_else(|e| panic!("{}", e));
            let mut canvas = text.clone();
            for step in 0..50 {
                let x0 = (step * 6) % WIDTH;
                for y in 0..10 {
                    for x in x0..x0 + 6 {
                        canvas[y * WIDTH + x] = (step % 16) as u8;
                    }
                }
                gif.current_mut().copy_from_slice(&canvas);
                let _ = gif.add_frame(6);
            }
            black_box(gif.close().map(|out| out.len()).ok())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encoder);
criterion_main!(benches);
