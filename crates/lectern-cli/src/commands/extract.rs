//! The `lectern extract` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use lectern_core::ingest::{
    collect_documents, DocumentAnalysis, IngestConfig, IngestEngine, IngestReport, IngestStatus,
    ProgressReporter,
};
use lectern_core::loader::PlainTextLoader;
use lectern_core::traits::DocumentLoader;
use lectern_core::{ConceptExtractor, Stopwords};

use crate::config::load_config_from;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_status(&self, source: &Path, status: &IngestStatus) {
        if *status == IngestStatus::Parsing {
            eprintln!("  Parsing: {}", source.display());
        }
    }

    fn on_document_complete(&self, analysis: &DocumentAnalysis) {
        match &analysis.status {
            IngestStatus::Error(message) => {
                eprintln!("  ERROR: {}: {message}", analysis.source.display());
            }
            _ => eprintln!(
                "  Done: {} ({} concepts)",
                analysis.source.display(),
                analysis.concepts.len()
            ),
        }
    }

    fn on_batch_complete(&self, total: usize, parsed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {parsed}/{total} parsed, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    input: PathBuf,
    max_concepts: Option<usize>,
    parallelism: Option<usize>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let engine_config = IngestConfig {
        parallelism: parallelism.unwrap_or(config.parallelism),
        max_concepts: max_concepts.unwrap_or(config.max_concepts),
    };
    anyhow::ensure!(
        engine_config.parallelism >= 1,
        "parallelism must be at least 1"
    );

    let loader: Arc<dyn DocumentLoader> =
        Arc::new(PlainTextLoader::with_max_bytes(config.max_document_bytes()));
    let paths = collect_documents(&input, loader.as_ref())?;
    anyhow::ensure!(
        !paths.is_empty(),
        "no text documents found in {}",
        input.display()
    );

    let stopwords = Stopwords::english().with_words(&config.extra_stopwords);
    let extractor = Arc::new(ConceptExtractor::new(stopwords));
    tracing::debug!(
        stopwords = extractor.stopwords().len(),
        "concept extractor ready"
    );

    eprintln!(
        "lectern v{}: extracting concepts from {} document(s) with the {} loader",
        env!("CARGO_PKG_VERSION"),
        paths.len(),
        loader.name()
    );
    eprintln!();

    let engine = IngestEngine::new(loader, extractor, engine_config);
    let report = engine.run(&paths, &ConsoleReporter).await;

    print_report(&report);

    let output = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("extract-{}.json", report.id))
    });
    report.save_json(&output)?;
    eprintln!("Analysis saved to {}", output.display());

    if report.parsed_count() == 0 {
        anyhow::bail!("no documents could be parsed");
    }

    Ok(())
}

fn print_report(report: &IngestReport) {
    use comfy_table::{Cell, Table};

    for doc in report.documents.iter().filter(|d| d.status.is_parsed()) {
        println!("\n{}", doc.source.display());
        if let Some(summary) = &doc.summary {
            println!("Summary: {summary}");
        }

        if doc.concepts.is_empty() {
            println!("No concepts found.");
            continue;
        }

        let mut table = Table::new();
        table.set_header(vec!["Rank", "Concept", "Importance"]);
        for (rank, concept) in doc.concepts.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&concept.keyword),
                Cell::new(concept.importance),
            ]);
        }
        println!("{table}");
    }
}
