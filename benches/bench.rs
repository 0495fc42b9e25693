//! Criterion benchmarks for the verifact classifier.
//!
//! This module covers the hot paths of the crate, including:
//! - Text normalization
//! - Single and batch prediction
//! - Training across dataset sizes
//! - Artifact serialization

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use verifact::analysis::normalizer::TextNormalizer;
use verifact::model::TrainParameters;
use verifact::pipeline::{
    Article, ClassificationPipeline, Label, TrainingSample, build_query, read_artifact,
    write_artifact,
};

const REAL_WORDS: &[&str] = &[
    "senate",
    "court",
    "officials",
    "budget",
    "report",
    "study",
    "researchers",
    "university",
    "agency",
    "federal",
    "council",
    "published",
    "approved",
    "confirmed",
    "according",
    "percent",
    "data",
    "hearing",
    "testimony",
    "review",
];

const FAKE_WORDS: &[&str] = &[
    "miracle",
    "cure",
    "shocking",
    "secret",
    "aliens",
    "hoax",
    "exposed",
    "banned",
    "elites",
    "viral",
    "trick",
    "conspiracy",
    "insiders",
    "overnight",
    "hidden",
    "truth",
    "celebrities",
    "clone",
    "chemtrails",
    "leaked",
];

/// Generate article text from a word list with a pseudo-random distribution.
fn generate_article_text(words: &[&str], seed: usize, length: usize) -> String {
    let mut text_words = Vec::with_capacity(length);
    for j in 0..length {
        let word_idx = (seed * 7 + j * 13) % words.len();
        text_words.push(words[word_idx]);
    }
    text_words.join(" ")
}

/// Generate labeled training samples, alternating real and fake.
fn generate_training_samples(count: usize) -> Vec<TrainingSample> {
    (0..count)
        .map(|i| {
            let real = i % 2 == 0;
            let words = if real { REAL_WORDS } else { FAKE_WORDS };
            let length = 30 + (i % 40); // Variable length articles
            let article = Article::new(
                generate_article_text(words, i, 6),
                "Staff Writer",
                generate_article_text(words, i + 1, length),
            );
            TrainingSample::new(article, if real { Label::Real } else { Label::Fake })
        })
        .collect()
}

/// Generate prediction queries over the same vocabulary.
fn generate_queries(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let words = if i % 2 == 0 { REAL_WORDS } else { FAKE_WORDS };
            build_query(
                &generate_article_text(words, i, 6),
                "Staff Writer",
                &generate_article_text(words, i + 3, 40),
            )
        })
        .collect()
}

/// Benchmark text normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = TextNormalizer::new().unwrap();
    let queries = generate_queries(1000);

    // Single article normalization
    group.bench_function("normalize_single_article", |b| {
        b.iter(|| {
            let result = normalizer.normalize(black_box(&queries[0]));
            black_box(result)
        })
    });

    // Batch normalization
    group.throughput(Throughput::Elements(100));
    group.bench_function("normalize_batch_articles", |b| {
        b.iter(|| {
            for query in queries.iter().take(100) {
                let result = normalizer.normalize(black_box(query));
                let _ = black_box(result);
            }
        })
    });

    group.finish();
}

/// Benchmark single and batch prediction.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let pipeline =
        ClassificationPipeline::fit(&generate_training_samples(200), &TrainParameters::default())
            .unwrap();
    let queries = generate_queries(500);

    group.bench_function("predict_single_article", |b| {
        b.iter(|| {
            let verdict = pipeline.verdict(black_box(&queries[0]));
            black_box(verdict)
        })
    });

    // Parallel batch prediction
    group.throughput(Throughput::Elements(500));
    group.bench_function("parallel_batch_prediction", |b| {
        b.iter(|| {
            let verdicts = pipeline.predict_batch(black_box(&queries));
            black_box(verdicts)
        })
    });

    // Sequential prediction for comparison
    group.bench_function("sequential_batch_prediction", |b| {
        b.iter(|| {
            let verdicts: Vec<_> = queries
                .iter()
                .map(|query| pipeline.verdict(black_box(query)))
                .collect();
            black_box(verdicts)
        })
    });

    group.finish();
}

/// Benchmark artifact serialization.
fn bench_artifact(c: &mut Criterion) {
    let mut group = c.benchmark_group("artifact");
    group.sample_size(20);

    let pipeline =
        ClassificationPipeline::fit(&generate_training_samples(200), &TrainParameters::default())
            .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench_model.vfm");

    group.bench_function("write_artifact", |b| {
        b.iter(|| {
            write_artifact(black_box(&path), &pipeline).unwrap();
        })
    });

    write_artifact(&path, &pipeline).unwrap();
    group.bench_function("read_artifact", |b| {
        b.iter(|| {
            let loaded = read_artifact(black_box(&path)).unwrap();
            black_box(loaded)
        })
    });

    group.finish();
}

/// Benchmark training across dataset sizes.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    for size in [100, 200].iter() {
        group.bench_with_input(format!("train_{size}_articles"), size, |b, &sample_count| {
            let samples = generate_training_samples(sample_count);
            let params = TrainParameters::default();

            b.iter(|| {
                let pipeline = ClassificationPipeline::fit(black_box(&samples), &params);
                black_box(pipeline)
            })
        });
    }

    group.finish();
}

// Group all benchmarks - core benchmarks for faster execution
criterion_group!(
    benches,
    bench_normalization,
    bench_prediction,
    bench_artifact
);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_training);

criterion_main!(benches);
