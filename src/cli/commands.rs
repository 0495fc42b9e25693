//! Command implementations for the verifact CLI.

use std::fs;
use std::time::Instant;

use rayon::ThreadPoolBuilder;

use crate::analysis::normalizer::TextNormalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset;
use crate::error::{Result, VerifactError};
use crate::model::TrainParameters;
use crate::pipeline::artifact::{read_artifact, write_artifact};
use crate::pipeline::evaluate::evaluate;
use crate::pipeline::{Article, ClassificationPipeline, InferenceService};

/// Execute a CLI command.
pub fn execute_command(args: VerifactArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args.clone(), &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize_text(normalize_args.clone(), &args),
    }
}

/// Train a classifier and write the model artifact.
fn train_model(args: TrainArgs, cli_args: &VerifactArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Training model from: {}", args.dataset.display());
    }

    let start_time = Instant::now();

    let samples = dataset::load(&args.dataset)?;
    if cli_args.verbosity() > 1 {
        let summary = dataset::summarize(&samples);
        println!(
            "Loaded {} examples ({} real, {} fake)",
            summary.examples, summary.real, summary.fake
        );
    }

    let (train_samples, holdout_samples) = dataset::split(samples, args.holdout, args.seed)?;

    let params = TrainParameters {
        learning_rate: args.learning_rate,
        epochs: args.epochs,
        l2: args.l2,
        balanced_class_weights: !args.unbalanced,
        min_df: args.min_df,
        seed: args.seed,
    };

    let thread_pool_size = args.threads.unwrap_or_else(num_cpus::get);
    let thread_pool = ThreadPoolBuilder::new()
        .num_threads(thread_pool_size)
        .thread_name(|i| format!("verifact-train-{i}"))
        .build()
        .map_err(|e| VerifactError::internal(format!("Failed to create thread pool: {e}")))?;

    let (mut pipeline, validation) = thread_pool.install(|| -> Result<_> {
        let pipeline = ClassificationPipeline::fit(&train_samples, &params)?;
        let validation = if holdout_samples.is_empty() {
            None
        } else {
            Some(evaluate(&pipeline, &holdout_samples)?)
        };
        Ok((pipeline, validation))
    })?;

    if let Some(report) = &validation {
        for (name, value) in report.metrics() {
            pipeline.metadata_mut().set_metric(name, value);
        }
        if cli_args.verbosity() > 1 {
            println!(
                "Holdout accuracy over {} examples: {:.4}",
                report.examples, report.accuracy
            );
        }
    }

    write_artifact(&args.model, &pipeline)?;

    let duration = start_time.elapsed();
    let train_summary = dataset::summarize(&train_samples);

    output_result(
        "Model trained successfully",
        &TrainResult {
            model_path: args.model.to_string_lossy().to_string(),
            training_examples: train_summary.examples,
            real_examples: train_summary.real,
            fake_examples: train_summary.fake,
            vocabulary_terms: pipeline.vocabulary_size(),
            holdout_examples: holdout_samples.len(),
            validation_accuracy: validation.as_ref().map(|report| report.accuracy),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )?;

    Ok(())
}

/// Classify one article, or a JSONL batch of them.
fn predict(args: PredictArgs, cli_args: &VerifactArgs) -> Result<()> {
    let service = InferenceService::open(&args.model)?;

    if let Some(input) = &args.input {
        if cli_args.verbosity() > 1 {
            println!("Classifying articles from: {}", input.display());
        }

        let articles = dataset::load_articles_jsonl(input)?;
        let start_time = Instant::now();
        let verdicts = service.classify_batch(&articles)?;
        let duration = start_time.elapsed();

        let predictions: Vec<ArticleVerdict> = articles
            .iter()
            .zip(&verdicts)
            .map(|(article, verdict)| ArticleVerdict {
                title: article.title.clone(),
                label: verdict.label,
                score: verdict.score,
            })
            .collect();
        let real = predictions.iter().filter(|p| p.label.is_real()).count();

        output_result(
            "Batch prediction completed",
            &BatchPredictResult {
                total: predictions.len(),
                real,
                fake: predictions.len() - real,
                predictions,
                duration_ms: duration.as_millis() as u64,
            },
            cli_args,
        )?;
    } else {
        let article = Article::new(args.title, args.author, args.text);
        let verdict = service.classify(&article)?;
        output_result("Prediction completed", &verdict, cli_args)?;
    }

    Ok(())
}

/// Evaluate a trained model against a labeled dataset.
fn evaluate_model(args: EvaluateArgs, cli_args: &VerifactArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Evaluating model: {}", args.model.display());
        println!("Dataset: {}", args.dataset.display());
    }

    let service = InferenceService::open(&args.model)?;
    let samples = dataset::load(&args.dataset)?;

    let start_time = Instant::now();
    let report = evaluate(service.pipeline(), &samples)?;
    let duration = start_time.elapsed();

    output_result(
        "Evaluation completed",
        &EvaluateResult {
            model_path: args.model.to_string_lossy().to_string(),
            dataset_path: args.dataset.to_string_lossy().to_string(),
            report,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )?;

    Ok(())
}

/// Show what is stored in a model artifact.
fn inspect_model(args: InspectArgs, cli_args: &VerifactArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Inspecting model: {}", args.model.display());
    }

    let file_size_bytes = fs::metadata(&args.model)?.len();
    let pipeline = read_artifact(&args.model)?;
    let metadata = pipeline.metadata();

    let (top_real_terms, top_fake_terms) = if args.detailed {
        let (real, fake) = top_weighted_terms(&pipeline, 10);
        (Some(real), Some(fake))
    } else {
        (None, None)
    };

    output_result(
        "Model artifact",
        &InspectResult {
            model_path: args.model.to_string_lossy().to_string(),
            model_name: metadata.name.clone(),
            model_version: metadata.version.clone(),
            trained_at: metadata.trained_at.to_rfc3339(),
            training_examples: metadata.training_examples,
            vocabulary_terms: pipeline.vocabulary_size(),
            fallback_label: pipeline.fallback_label(),
            file_size_bytes,
            hyperparameters: metadata.hyperparameters.clone(),
            validation_metrics: metadata.validation_metrics.clone(),
            top_real_terms,
            top_fake_terms,
        },
        cli_args,
    )?;

    Ok(())
}

/// Show how a piece of text is normalized.
fn normalize_text(args: NormalizeArgs, cli_args: &VerifactArgs) -> Result<()> {
    let normalizer = TextNormalizer::new()?;
    let normalized = normalizer.normalize(&args.text)?;
    let tokens = if normalized.is_empty() {
        0
    } else {
        normalized.split(' ').count()
    };

    output_result(
        "Normalized text",
        &NormalizeResult {
            input: args.text,
            normalized,
            tokens,
        },
        cli_args,
    )?;

    Ok(())
}

/// Collect the most heavily weighted vocabulary terms in each direction.
fn top_weighted_terms(
    pipeline: &ClassificationPipeline,
    count: usize,
) -> (Vec<WeightedTerm>, Vec<WeightedTerm>) {
    let terms = pipeline.vectorizer().terms();
    let weights = pipeline.classifier().weights();

    let mut ranked: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let real = ranked
        .iter()
        .take(count)
        .filter(|(_, weight)| *weight > 0.0)
        .map(|&(index, weight)| WeightedTerm {
            term: terms[index].clone(),
            weight,
        })
        .collect();
    let fake = ranked
        .iter()
        .rev()
        .take(count)
        .filter(|(_, weight)| *weight < 0.0)
        .map(|&(index, weight)| WeightedTerm {
            term: terms[index].clone(),
            weight,
        })
        .collect();

    (real, fake)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Label, TrainingSample};
    use clap::Parser;
    use std::io::Write;

    const TRAIN_CSV: &str = "\
title,author,text,label
Senate passes budget,Ann Lee,The senate voted to approve the federal budget on Tuesday,1
Court upholds ruling,Bob Ray,The appeals court upheld the lower court decision,1
Study finds benefits,Carol Kim,Researchers published a peer reviewed study on exercise,1
Officials confirm plan,Dan Wu,City officials confirmed the infrastructure plan,1
Miracle cure revealed,,Doctors hate this one weird trick that cures everything,0
Lizard people exposed,Anonymous,Secret lizard people control the world government,0
Moon landing staged,Anonymous,The moon landing was filmed in a secret studio,0
Aliens endorse candidate,,Aliens from mars have endorsed a presidential candidate,0
";

    fn training_samples() -> Vec<TrainingSample> {
        let mut samples = Vec::new();
        for line in TRAIN_CSV.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            samples.push(TrainingSample::new(
                Article::new(fields[0], fields[1], fields[2]),
                if fields[3] == "1" {
                    Label::Real
                } else {
                    Label::Fake
                },
            ));
        }
        samples
    }

    #[test]
    fn test_train_and_predict_commands() {
        let dir = tempfile::tempdir().unwrap();
        let dataset_path = dir.path().join("news.csv");
        let model_path = dir.path().join("model.vfm");

        let mut file = fs::File::create(&dataset_path).unwrap();
        file.write_all(TRAIN_CSV.as_bytes()).unwrap();

        let args = VerifactArgs::try_parse_from([
            "verifact",
            "--quiet",
            "train",
            "--dataset",
            dataset_path.to_str().unwrap(),
            "--model",
            model_path.to_str().unwrap(),
            "--threads",
            "2",
        ])
        .unwrap();
        execute_command(args).unwrap();
        assert!(model_path.exists());

        let args = VerifactArgs::try_parse_from([
            "verifact",
            "--quiet",
            "--format",
            "json",
            "predict",
            "--model",
            model_path.to_str().unwrap(),
            "--title",
            "Senate passes budget",
            "--text",
            "The senate voted to approve the budget",
        ])
        .unwrap();
        execute_command(args).unwrap();
    }

    #[test]
    fn test_train_with_holdout_records_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let dataset_path = dir.path().join("news.csv");
        let model_path = dir.path().join("model.vfm");

        let mut file = fs::File::create(&dataset_path).unwrap();
        file.write_all(TRAIN_CSV.as_bytes()).unwrap();

        let args = VerifactArgs::try_parse_from([
            "verifact",
            "--quiet",
            "train",
            "--dataset",
            dataset_path.to_str().unwrap(),
            "--model",
            model_path.to_str().unwrap(),
            "--holdout",
            "0.25",
        ])
        .unwrap();
        execute_command(args).unwrap();

        let pipeline = read_artifact(&model_path).unwrap();
        assert!(
            pipeline
                .metadata()
                .validation_metrics
                .contains_key("accuracy")
        );
    }

    #[test]
    fn test_top_weighted_terms() {
        let params = TrainParameters::default();
        let pipeline = ClassificationPipeline::fit(&training_samples(), &params).unwrap();

        let (real, fake) = top_weighted_terms(&pipeline, 5);
        assert!(!real.is_empty());
        assert!(!fake.is_empty());
        assert!(real.iter().all(|t| t.weight > 0.0));
        assert!(fake.iter().all(|t| t.weight < 0.0));
        for pair in real.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn test_predict_missing_model_fails() {
        let args = VerifactArgs::try_parse_from([
            "verifact",
            "--quiet",
            "predict",
            "--model",
            "/nonexistent/model.vfm",
            "--title",
            "Anything",
        ])
        .unwrap();
        assert!(execute_command(args).is_err());
    }
}
