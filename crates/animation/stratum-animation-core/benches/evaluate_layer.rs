//! Benchmarks for single-layer evaluation with overlapping strips.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stratum_animation_core::{
    evaluate_layer, AnimatedTarget, Animation, EvalContext, Interpolation, LayerId, OutputIndex,
    PropertyResolver, StripType,
};

struct Rig {
    name: String,
    bones: usize,
}

impl AnimatedTarget for Rig {
    fn id_name(&self) -> &str {
        &self.name
    }
}

impl PropertyResolver for Rig {
    type Handle = (usize, i32);

    fn resolve(&self, rna_path: &str, array_index: i32) -> Option<(usize, i32)> {
        let bone: usize = rna_path.strip_prefix("bone_")?.parse().ok()?;
        (bone < self.bones).then_some((bone, array_index))
    }
}

/// Layer with `strips` overlapping strips, each keying every bone channel.
fn build(bones: usize, strips: usize) -> (Animation, Rig, LayerId, OutputIndex) {
    let rig = Rig {
        name: "OBrig".to_string(),
        bones,
    };
    let mut anim = Animation::new();
    let out = anim.output_add();
    out.assign_id(&rig);
    let out = out.clone();
    let settings = anim
        .keyframe_settings(false)
        .with_interpolation(Interpolation::Bezier);

    let layer = anim.layer_add("bench");
    for s in 0..strips {
        let strip = layer.strip_add(StripType::Keyframe);
        let start = (s * 10) as f32;
        if strip.resize(start, start + 100.0).is_err() || strip.set_frame_offset(start).is_err() {
            continue;
        }
        let Some(keys) = strip.keyframe_data_mut() else {
            continue;
        };
        for bone in 0..bones {
            let path = format!("bone_{bone}");
            for axis in 0..3i32 {
                for k in 0..8 {
                    let t = k as f32 * 12.5;
                    let v = ((bone + axis as usize + k) as f32 * 0.37).sin();
                    let _ = keys.keyframe_insert(&out, &path, axis, (t, v), &settings);
                }
            }
        }
    }
    let layer_id = layer.id();
    (anim, rig, layer_id, out.stable_index())
}

fn bench_evaluate_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_layer");
    for (bones, strips) in [(10, 1), (50, 4), (200, 8)] {
        let (anim, rig, layer_id, output) = build(bones, strips);
        let Some(layer) = anim.layer_by_id(layer_id) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::new("bones_x_strips", format!("{bones}x{strips}")),
            &(),
            |b, _| {
                let mut t = 0.0f32;
                b.iter(|| {
                    t = (t + 0.5) % 150.0;
                    let result = evaluate_layer(&rig, layer, output, &EvalContext::new(t));
                    black_box(result.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate_layer);
criterion_main!(benches);
