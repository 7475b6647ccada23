use criterion::{Criterion, black_box, criterion_group, criterion_main};
use css::{TokenizerConfig, tokenize, tokenize_with};

const SMALL_RULES: usize = 64;
const LARGE_RULES: usize = 20_000;

fn make_rules(rules: usize) -> String {
    let mut out = String::with_capacity(rules * 96);
    for index in 0..rules {
        out.push_str(&format!(
            ".rule-{index} {{ color: #ab{:04x}; margin: {}.5px 1e2em 50%; \
             background: url( assets/img-{index}.png ); content: \"r\\65 sult {index}\" }}\n",
            index % 0xFFFF,
            index % 40,
        ));
    }
    out
}

fn bench_tokenize_small(c: &mut Criterion) {
    let input = make_rules(SMALL_RULES);
    c.bench_function("bench_tokenize_small", |b| {
        b.iter(|| {
            let tokenizer = tokenize(black_box(&input)).unwrap();
            black_box(tokenizer.tokens().len());
        });
    });
}

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_rules(LARGE_RULES);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| {
            let tokenizer = tokenize_with(
                TokenizerConfig {
                    size_hint: input.len(),
                    ..TokenizerConfig::default()
                },
                black_box(&input),
            )
            .unwrap();
            black_box(tokenizer.tokens().len());
        });
    });
}

fn bench_tokenize_comment_heavy(c: &mut Criterion) {
    let mut input = String::with_capacity(1 << 18);
    while input.len() < 1 << 18 {
        input.push_str("/* lorem ** ipsum */ ident ");
    }
    c.bench_function("bench_tokenize_comment_heavy", |b| {
        b.iter(|| {
            let tokenizer = tokenize(black_box(&input)).unwrap();
            black_box(tokenizer.stats().tokens_emitted);
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize_small,
    bench_tokenize_large,
    bench_tokenize_comment_heavy
);
criterion_main!(benches);
