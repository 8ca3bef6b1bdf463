//! Validation overhead benchmarks
//!
//! Measures rule parsing and record validation for passing and failing
//! records, and how sequence length affects per-element evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rulecheck::{validate, Grammar, Record};

/// Typical signup payload
#[derive(Record)]
struct Signup {
    #[validate("min:3;max:32")]
    pub username: String,
    #[validate("in:admin,editor,viewer")]
    pub role: String,
    #[validate("min:18;max:120")]
    pub age: u8,
    #[validate("max:16")]
    pub tags: Vec<String>,
}

/// Integer sequence with a single bound
#[derive(Record)]
struct Scores {
    #[validate("min:0;max:100")]
    pub values: Vec<i32>,
}

fn valid_signup() -> Signup {
    Signup {
        username: "ferris".to_string(),
        role: "editor".to_string(),
        age: 30,
        tags: vec!["rust".to_string(), "crab".to_string()],
    }
}

fn invalid_signup() -> Signup {
    Signup {
        username: "x".to_string(),
        role: "owner".to_string(),
        age: 7,
        tags: vec!["a-very-long-tag-name".to_string()],
    }
}

/// Benchmark rule text parsing
fn bench_parse_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rules");
    let grammar = Grammar::default();

    group.bench_function("single_clause", |b| {
        b.iter(|| grammar.parse_rules(black_box("len:20")))
    });

    group.bench_function("four_clauses", |b| {
        b.iter(|| grammar.parse_rules(black_box("min:3;max:32;in:a,b,c,d;len:5")))
    });

    group.finish();
}

/// Benchmark whole-record validation
fn bench_validate_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_record");
    let valid = valid_signup();
    let invalid = invalid_signup();

    group.bench_function("valid", |b| b.iter(|| validate(black_box(&valid))));
    group.bench_function("invalid", |b| b.iter(|| validate(black_box(&invalid))));

    group.finish();
}

/// Benchmark sequence fields of growing length
fn bench_sequence_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_length");

    for len in [1usize, 10, 100, 1000].iter() {
        let scores = Scores {
            values: (0..*len as i32).map(|i| i % 150).collect(),
        };
        group.bench_with_input(BenchmarkId::new("elements", len), &scores, |b, scores| {
            b.iter(|| validate(black_box(scores)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_rules,
    bench_validate_record,
    bench_sequence_length,
);
criterion_main!(benches);
