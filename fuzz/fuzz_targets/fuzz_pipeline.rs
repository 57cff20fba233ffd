#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use seqkit::{Seq, SeqConfig, wrap, wrap_with_config};

/// One intermediate stage, applied both to a `Seq` and to a plain `Vec`.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Stage {
    Take(u8),
    Skip(u8),
    AddOne,
    KeepEven,
    Intersperse(i16),
    /// Repeat, immediately bounded so the model stays finite.
    RepeatTake(u8),
    /// Zip with the position and add it in.
    ZipIndex,
    /// Replace each element `x` with `x % 4` copies of itself.
    Explode,
}

#[derive(Arbitrary, Debug)]
struct Input {
    config: SeqConfig,
    source: Vec<i16>,
    stages: Vec<Stage>,
}

fn apply_seq(seq: Seq<'static, i32>, stage: Stage) -> Seq<'static, i32> {
    match stage {
        Stage::Take(n) => seq.take(n as usize),
        Stage::Skip(n) => seq.skip(n as usize),
        Stage::AddOne => seq.map(|x| x.wrapping_add(1)),
        Stage::KeepEven => seq.filter(|x| x % 2 == 0),
        Stage::Intersperse(d) => seq.intersperse(d as i32),
        Stage::RepeatTake(n) => seq.repeat().take(n as usize),
        Stage::ZipIndex => seq.zip_with(0i32.., |x, i| x.wrapping_add(i)),
        Stage::Explode => seq.flat_map(|x| vec![x; x.rem_euclid(4) as usize]),
    }
}

fn apply_model(items: Vec<i32>, stage: Stage) -> Vec<i32> {
    match stage {
        Stage::Take(n) => items.into_iter().take(n as usize).collect(),
        Stage::Skip(n) => items.into_iter().skip(n as usize).collect(),
        Stage::AddOne => items.into_iter().map(|x| x.wrapping_add(1)).collect(),
        Stage::KeepEven => items.into_iter().filter(|x| x % 2 == 0).collect(),
        Stage::Intersperse(d) => {
            let mut out = Vec::with_capacity(items.len() * 2);
            for (i, x) in items.into_iter().enumerate() {
                if i > 0 {
                    out.push(d as i32);
                }
                out.push(x);
            }
            out
        }
        Stage::RepeatTake(n) => {
            if items.is_empty() {
                Vec::new()
            } else {
                items.iter().copied().cycle().take(n as usize).collect()
            }
        }
        Stage::ZipIndex => items
            .into_iter()
            .zip(0i32..)
            .map(|(x, i)| x.wrapping_add(i))
            .collect(),
        Stage::Explode => items
            .into_iter()
            .flat_map(|x| vec![x; x.rem_euclid(4) as usize])
            .collect(),
    }
}

fuzz_target!(|input: Input| {
    let source: Vec<i32> = input.source.iter().take(64).map(|&x| x as i32).collect();
    let stages = &input.stages[..input.stages.len().min(8)];

    let mut seq = wrap_with_config(source.clone(), input.config);
    let mut model = source;
    for &stage in stages {
        seq = apply_seq(seq, stage);
        model = apply_model(model, stage);
    }

    let seq_config = seq.config();
    let expected_sum: i64 = model.iter().map(|&x| x as i64).sum();
    let out = seq.collect();
    assert_eq!(out, model);
    assert_eq!(seq_config, input.config);
    assert_eq!(wrap(out).map(|x| x as i64).sum(), expected_sum);
});
