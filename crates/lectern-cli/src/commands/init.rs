//! The `lectern init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lectern.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("banks")?;
    write_if_missing(Path::new("banks/example.toml"), EXAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Run: lectern validate --bank banks/example.toml");
    println!("  2. Run: lectern assemble --bank banks/example.toml --output test.json");
    println!("  3. Run: lectern export --test test.json --output test.html");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lectern configuration

# Similarity a short answer needs to be accepted (0.0 - 1.0)
threshold = 0.85
# Concepts kept per document
max_concepts = 5
# Documents processed concurrently by `lectern extract`
parallelism = 4
# Larger documents are skipped by `lectern extract`
max_document_mb = 10
output_dir = "./lectern-results"
# Words never reported as concepts, on top of the built-in list
extra_stopwords = []
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Question Bank"
description = "A small bank to get started"

[[questions]]
id = "mitochondria"
concept = "mitochondria"
type = "short_answer"
prompt = "Which organelle produces most of the cell's ATP?"
correct_answer = "Mitochondria"
difficulty = 2

[[questions]]
id = "photosynthesis"
concept = "photosynthesis"
type = "mcq"
prompt = "Where does photosynthesis take place?"
correct_answer = "Chloroplast"
difficulty = 2

[questions.options]
A = "Nucleus"
B = "Chloroplast"
C = "Ribosome"
D = "Golgi apparatus"

[[questions]]
id = "membrane"
concept = "cell membrane"
type = "short_answer"
prompt = "What structure controls what enters and leaves the cell?"
correct_answer = "Cell membrane"
difficulty = 3
"#;
