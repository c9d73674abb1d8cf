//! Many-build analysis with a combined summary
//!
//! One worker runs sources in order and pauses `request_delay_ms` after each
//! rendered URL. With more than one job, sources are spread over a rayon pool
//! and each worker keeps its own analyzer (and so its own resolve cache).

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nwgear::{aggregate, BuildAnalyzer, BuildReport, CostSummary, FetchConfig, PriceTable};
use rayon::prelude::*;
use serde::Serialize;

use crate::cli::{DataArgs, OutputFormat};
use crate::config::Config;
use crate::output;
use crate::sources::{is_url, DocumentSource, Documents};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BuildReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub builds: Vec<BuildOutcome>,
    pub combined: CostSummary,
}

fn analyze_one(
    analyzer: &mut BuildAnalyzer,
    documents: &dyn DocumentSource,
    prices: &PriceTable,
    source: &str,
) -> BuildOutcome {
    let result = documents.load(source).and_then(|root| {
        analyzer
            .analyze_or_empty(&root, prices)
            .with_context(|| format!("Failed to analyze {}", source))
    });

    match result {
        Ok(report) => BuildOutcome {
            source: source.to_string(),
            report: Some(report),
            error: None,
        },
        Err(e) => {
            tracing::warn!("{}: {:#}", source, e);
            BuildOutcome {
                source: source.to_string(),
                report: None,
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Run every source and combine the successful builds
pub fn run(
    analyzer: BuildAnalyzer,
    documents: &(dyn DocumentSource + Sync),
    prices: &PriceTable,
    sources: &[String],
    fetch: &FetchConfig,
) -> BatchReport {
    let pb = progress_bar(sources.len());

    let builds: Vec<BuildOutcome> = if fetch.max_concurrency <= 1 {
        let mut analyzer = analyzer;
        let mut outcomes = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            pb.set_message(source.clone());
            outcomes.push(analyze_one(&mut analyzer, documents, prices, source));
            pb.inc(1);
            if is_url(source) && index + 1 < sources.len() {
                std::thread::sleep(fetch.request_delay());
            }
        }
        outcomes
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(fetch.max_concurrency)
            .build();
        let work = || {
            sources
                .par_iter()
                .map_init(
                    || analyzer.clone(),
                    |analyzer, source| {
                        let outcome = analyze_one(analyzer, documents, prices, source);
                        pb.inc(1);
                        outcome
                    },
                )
                .collect::<Vec<BuildOutcome>>()
        };
        match pool {
            Ok(pool) => pool.install(work),
            Err(e) => {
                tracing::warn!("Falling back to the global thread pool: {}", e);
                work()
            }
        }
    };

    pb.finish_with_message("Done");

    let items: Vec<_> = builds
        .iter()
        .filter_map(|b| b.report.as_ref())
        .flat_map(|r| r.items.iter().cloned())
        .collect();
    let combined = aggregate(&items, prices);

    BatchReport { builds, combined }
}

pub fn handle(
    sources: &[String],
    render_url: Option<String>,
    jobs: Option<usize>,
    format: OutputFormat,
    data: &DataArgs,
) -> Result<()> {
    let config = Config::load()?;

    let mut fetch = config.fetch.clone();
    if let Some(jobs) = jobs {
        fetch.max_concurrency = jobs;
    }
    fetch.validate().context("Invalid --jobs")?;

    let render_url = render_url.or_else(|| config.render_url.clone());
    let documents = Documents::new(render_url.as_deref(), &fetch);
    let prices = super::price_table(data, &config)?;
    let analyzer = super::analyzer(data, &config)?;

    let report = run(analyzer, &documents, &prices, sources, &fetch);

    let failed = report.builds.iter().filter(|b| b.error.is_some()).count();
    eprintln!(
        "Analyzed: {}, Failed: {}",
        report.builds.len() - failed,
        failed
    );
    if failed == report.builds.len() {
        bail!("No build could be analyzed");
    }

    match output::structured(&report, format)? {
        Some(text) => println!("{}", text),
        None => {
            for build in &report.builds {
                match (&build.report, &build.error) {
                    (Some(r), _) => println!(
                        "{}: {} items, {:.2}",
                        build.source,
                        r.items.len(),
                        r.summary.grand_total
                    ),
                    (None, Some(e)) => println!("{}: failed ({})", build.source, e),
                    (None, None) => {}
                }
            }
            println!();
            print!("{}", output::summary_table(&report.combined));
        }
    }

    Ok(())
}
