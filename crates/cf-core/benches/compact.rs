use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cf_core::{combine, compact, Rule};

fn synthetic_rules(count: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| {
            let domain = format!("site{}.com", i % 5_000);
            let selector = format!(".ad-slot-{}", i % 97);
            let rule = Rule::hide(&[domain.as_str()], &selector);
            if i % 11 == 0 {
                rule.exception()
            } else {
                rule
            }
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let rules = synthetic_rules(100_000);

    c.bench_function("combine_100k", |b| {
        b.iter(|| combine(black_box(rules.clone())))
    });

    let table = combine(rules);
    c.bench_function("compact_5k_domains", |b| {
        b.iter(|| compact(black_box(table.clone())))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
