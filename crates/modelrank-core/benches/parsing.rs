use criterion::{black_box, criterion_group, criterion_main, Criterion};

use modelrank_core::parser::parse_claim;

fn bench_parse_claim(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_claim");

    let simple = "model-a was created on 2023-01-01; model-b is located at index 0; \
                  model-a was created 1 models before model-b; before 1 January 2024";

    let reordered = "before 15 March 2024 gpt-4 was created 3 models before gpt-3.5-turbo \
                     and davinci-002 is located at index 12 while whisper-1 was created on 2023-02-27";

    let missing = "model-a was created on 2023-01-01; model-b is located at index 0";

    let padded = {
        let mut s = String::new();
        for i in 0..200 {
            s.push_str(&format!("filler token number {i} with no assertions. "));
        }
        s.push_str(simple);
        s
    };

    group.bench_function("simple", |b| b.iter(|| parse_claim(black_box(simple))));

    group.bench_function("reordered", |b| {
        b.iter(|| parse_claim(black_box(reordered)))
    });

    group.bench_function("missing_pattern", |b| {
        b.iter(|| parse_claim(black_box(missing)))
    });

    group.bench_function("padded", |b| b.iter(|| parse_claim(black_box(&padded))));

    group.finish();
}

criterion_group!(benches, bench_parse_claim);
criterion_main!(benches);
