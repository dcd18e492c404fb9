//! Criterion benchmarks for tweetsieve.
//!
//! Covers the per-document hot paths:
//! - Normalization and social-object counting
//! - Auxiliary feature extraction
//! - Fitting and applying the full feature pipeline
//! - Classifier training

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use tweetsieve::config::{LexicalConfig, PipelineConfig, PosConfig};
use tweetsieve::features::auxiliary::AuxiliaryExtractor;
use tweetsieve::label::Label;
use tweetsieve::ml::Classifier;
use tweetsieve::ml::classifier::TweetClassifier;
use tweetsieve::normalize::{count_social_objects, normalize};
use tweetsieve::pipeline::FeaturePipeline;

/// Generate synthetic tweets with URLs, mentions, hashtags and retweets.
fn generate_tweets(count: usize) -> Vec<String> {
    let words = [
        "trash", "lovely", "day", "game", "stupid", "people", "great", "hate", "walk", "coffee",
        "friends", "night", "shut", "up", "beach", "weather", "worthless", "happy", "really",
        "never",
    ];

    (0..count)
        .map(|i| {
            let length = 5 + (i % 15);
            let mut tweet: Vec<String> = (0..length)
                .map(|j| words[(i * 7 + j * 13) % words.len()].to_string())
                .collect();
            if i % 3 == 0 {
                tweet.insert(0, format!("@user{}", i % 50));
            }
            if i % 5 == 0 {
                tweet.push(format!("http://t.co/{i}"));
            }
            if i % 7 == 0 {
                tweet.push(format!("#tag{}", i % 10));
            }
            if i % 11 == 0 {
                tweet.insert(0, "RT".to_string());
            }
            tweet.join(" ")
        })
        .collect()
}

fn bench_config() -> PipelineConfig {
    PipelineConfig {
        lexical: LexicalConfig {
            min_df: 2,
            ..LexicalConfig::default()
        },
        pos: PosConfig {
            min_df: 2,
            ..PosConfig::default()
        },
        ..PipelineConfig::default()
    }
}

fn bench_normalization(c: &mut Criterion) {
    let tweets = generate_tweets(1000);

    let mut group = c.benchmark_group("normalization");
    group.throughput(Throughput::Elements(tweets.len() as u64));
    group.bench_function("normalize", |b| {
        b.iter(|| {
            for tweet in &tweets {
                black_box(normalize(black_box(tweet)));
            }
        })
    });
    group.bench_function("count_social_objects", |b| {
        b.iter(|| {
            for tweet in &tweets {
                black_box(count_social_objects(black_box(tweet)));
            }
        })
    });
    group.finish();
}

fn bench_auxiliary(c: &mut Criterion) {
    let tweets = generate_tweets(1000);
    let extractor = AuxiliaryExtractor::new();

    let mut group = c.benchmark_group("auxiliary");
    group.throughput(Throughput::Elements(tweets.len() as u64));
    group.bench_function("transform_1000", |b| {
        b.iter(|| black_box(extractor.transform(black_box(&tweets))))
    });
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let tweets = generate_tweets(1000);
    let config = bench_config();
    let pipeline = FeaturePipeline::fit(&tweets, &config).expect("pipeline fits");

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.throughput(Throughput::Elements(tweets.len() as u64));
    group.bench_function("fit_1000", |b| {
        b.iter(|| black_box(FeaturePipeline::fit(black_box(&tweets), &config)))
    });
    group.bench_function("transform_1000", |b| {
        b.iter(|| black_box(pipeline.transform(black_box(&tweets))))
    });
    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let tweets = generate_tweets(500);
    let config = bench_config();
    let (_, matrix) = FeaturePipeline::fit_transform(&tweets, &config).expect("pipeline fits");
    let labels: Vec<Label> = (0..tweets.len()).map(|i| Label::ALL[i % 3]).collect();

    let mut group = c.benchmark_group("training");
    group.sample_size(10);
    group.bench_function("tweet_classifier_fit_500", |b| {
        b.iter(|| {
            let mut classifier = TweetClassifier::new(&config.training);
            classifier.fit(black_box(&matrix), &labels).expect("classifier fits");
            black_box(classifier)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_auxiliary,
    bench_pipeline,
    bench_training
);
criterion_main!(benches);
