//! Benchmarks for section rebuilding and range writes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use face_anim_edit::{
    animation::{AnimationBuffer, CONTROL_BYTE_OFFSET, Category, FRAME_SIZE},
    segment::{ExpressionEditor, RangeWrite, rebuild_sections},
};

/// Animation whose eye code changes every `run` frames.
fn animation_bytes(frames: usize, run: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; frames * FRAME_SIZE];
    for f in 0..frames {
        let eye = ((f / run) % 9) as u8;
        let mouth = ((f / (run * 3)) % 5) as u8;
        bytes[f * FRAME_SIZE + CONTROL_BYTE_OFFSET] = (mouth << 4) | eye;
    }
    bytes
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_sections");

    for frames in [100, 1_000, 10_000, 50_000] {
        let buffer = AnimationBuffer::load(animation_bytes(frames, 7)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(frames), &frames, |b, _| {
            b.iter(|| {
                for category in Category::ALL {
                    let sections =
                        rebuild_sections(black_box(&buffer), |byte| category.decode(byte));
                    black_box(sections.unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_range_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_write");

    for frames in [1_000, 10_000] {
        let mut editor = ExpressionEditor::new();
        editor.load(animation_bytes(frames, 11)).unwrap();
        let end = (frames / 2) as i64;
        let mut code = 0u8;

        group.bench_with_input(BenchmarkId::from_parameter(frames), &frames, |b, _| {
            b.iter(|| {
                code = (code + 1) % 9;
                editor
                    .apply_range_write(black_box(&RangeWrite::new(Category::Eye, 10, end, code)))
                    .unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_range_write);
criterion_main!(benches);
