use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use refa::regex::Regex;
use regex::Regex as LibRegex;

const GROUPED_PATTERN: &str = "(ab((cd)*)ef)+";
const GROUP_FREE_PATTERN: &str = "ab*c";

lazy_static! {
    static ref HAYSTACK: String = "abcdefabefabcdcdef".repeat(16);
    static ref NOISY_HAYSTACK: String = {
        let mut text = String::new();
        for _ in 0..16 {
            text.push_str("bbbbabbbabbbbbbabb");
            text.push_str(&HAYSTACK);
        }
        text
    };
}

pub fn compile(c: &mut Criterion) {
    c.bench_function("refa compile", |b| {
        b.iter(|| Regex::compile(black_box(GROUPED_PATTERN)).unwrap())
    });
    c.bench_function("refa compile to dfa", |b| {
        b.iter(|| Regex::compile(black_box(GROUP_FREE_PATTERN)).unwrap())
    });
    c.bench_function("library compile", |b| {
        b.iter(|| LibRegex::new(black_box(GROUPED_PATTERN)).unwrap())
    });
}

pub fn find(c: &mut Criterion) {
    let regex = Regex::compile(GROUP_FREE_PATTERN).unwrap();
    c.bench_function("refa find", |b| {
        b.iter(|| regex.find(black_box(&NOISY_HAYSTACK)))
    });

    let lib_regex = LibRegex::new(GROUP_FREE_PATTERN).unwrap();
    c.bench_function("library find", |b| {
        b.iter(|| lib_regex.find(black_box(&NOISY_HAYSTACK)))
    });
}

pub fn captures(c: &mut Criterion) {
    let regex = Regex::compile(GROUPED_PATTERN).unwrap();
    c.bench_function("refa captures", |b| {
        b.iter(|| regex.captures(black_box(&HAYSTACK)))
    });

    let lib_regex = LibRegex::new(GROUPED_PATTERN).unwrap();
    c.bench_function("library captures", |b| {
        b.iter(|| lib_regex.captures(black_box(&HAYSTACK)))
    });
}

criterion_group!(benches, compile, find, captures);
criterion_main!(benches);
