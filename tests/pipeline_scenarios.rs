use verifact::analysis::normalizer::TextNormalizer;
use verifact::dataset;
use verifact::error::Result;
use verifact::model::TrainParameters;
use verifact::pipeline::{ClassificationPipeline, Label, TrainingSample, build_query, evaluate};

const SAMPLE_ARTICLES: &str = include_str!("../resources/sample_articles.csv");

#[test]
fn trained_pipeline_separates_real_from_fake_articles() -> Result<()> {
    let pipeline = train_sample_pipeline()?;

    let real_query = build_query(
        "Council approves transit funding",
        "Laura Diaz",
        "The council voted to approve funding for the transit project, officials said.",
    );
    let fake_query = build_query(
        "Shocking miracle cure the elites banned",
        "",
        "This secret trick cures every disease overnight but the government is hiding the truth.",
    );

    let real_verdict = pipeline.verdict(&real_query)?;
    let fake_verdict = pipeline.verdict(&fake_query)?;

    assert_eq!(real_verdict.label, Label::Real);
    assert!(real_verdict.score > 0.0);
    assert_eq!(fake_verdict.label, Label::Fake);
    assert!(fake_verdict.score < 0.0);
    Ok(())
}

#[test]
fn training_is_deterministic_across_runs() -> Result<()> {
    let samples = sample_dataset()?;
    let params = TrainParameters::default();

    let first = ClassificationPipeline::fit(&samples, &params)?;
    let second = ClassificationPipeline::fit(&samples, &params)?;

    assert_eq!(first.classifier(), second.classifier());

    let query = build_query(
        "Officials confirm budget vote",
        "",
        "The senate approved the federal budget.",
    );
    for _ in 0..3 {
        assert_eq!(first.verdict(&query)?, second.verdict(&query)?);
    }
    Ok(())
}

#[test]
fn out_of_vocabulary_articles_fall_back_to_majority_label() -> Result<()> {
    let pipeline = train_sample_pipeline()?;

    // None of these words survive into the training vocabulary.
    let verdict = pipeline.verdict("zxqv wblort frumious")?;
    assert_eq!(verdict.label, pipeline.fallback_label());
    assert_eq!(verdict.score, 0.0);

    // The sample dataset is balanced, and ties go to Real.
    assert_eq!(pipeline.fallback_label(), Label::Real);
    Ok(())
}

#[test]
fn empty_articles_get_the_fallback_label() -> Result<()> {
    let pipeline = train_sample_pipeline()?;

    let verdict = pipeline.verdict(&build_query("", "", ""))?;
    assert_eq!(verdict.label, pipeline.fallback_label());
    assert_eq!(verdict.score, 0.0);
    Ok(())
}

#[test]
fn holdout_split_feeds_the_evaluation_report() -> Result<()> {
    let samples = sample_dataset()?;
    let (train, held) = dataset::split(samples, 0.25, 42)?;
    assert_eq!(train.len(), 18);
    assert_eq!(held.len(), 6);

    let pipeline = ClassificationPipeline::fit(&train, &TrainParameters::default())?;
    let report = evaluate(&pipeline, &held)?;

    assert_eq!(report.examples, 6);
    assert!((0.0..=1.0).contains(&report.accuracy));
    assert_eq!(
        report.true_real + report.false_real + report.true_fake + report.false_fake,
        6
    );
    assert_eq!(report.metrics().len(), 7);
    Ok(())
}

#[test]
fn batch_predictions_match_single_predictions() -> Result<()> {
    let pipeline = train_sample_pipeline()?;

    let queries: Vec<String> = vec![
        build_query("Senate hears budget testimony", "", "Officials testified about the budget."),
        build_query("Miracle berry melts fat", "", "The elites banned this shocking cure."),
        build_query("", "", ""),
    ];

    let batch = pipeline.predict_batch(&queries)?;
    assert_eq!(batch.len(), queries.len());
    for (query, verdict) in queries.iter().zip(&batch) {
        assert_eq!(*verdict, pipeline.verdict(query)?);
    }
    Ok(())
}

#[test]
fn normalization_collapses_plurals_and_stop_words() -> Result<()> {
    let normalizer = TextNormalizer::new()?;

    let wordy = normalizer.normalize("The officials confirmed the budgets.")?;
    let terse = normalizer.normalize("Officials: confirmed budget!")?;
    assert_eq!(wordy, "official confirmed budget");
    assert_eq!(wordy, terse);
    Ok(())
}

fn train_sample_pipeline() -> Result<ClassificationPipeline> {
    ClassificationPipeline::fit(&sample_dataset()?, &TrainParameters::default())
}

fn sample_dataset() -> Result<Vec<TrainingSample>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample_articles.csv");
    std::fs::write(&path, SAMPLE_ARTICLES)?;

    let samples = dataset::load_csv(&path)?;
    assert_eq!(samples.len(), 24);
    Ok(samples)
}
