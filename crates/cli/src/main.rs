//! CLI tool for translating the text of PowerPoint files.

use anyhow::{Context, Result};
use clap::Parser;
use ppt_translate_client::provider::DEFAULT_ENDPOINT;
use ppt_translate_client::{GoogleTranslator, ProviderConfig};
use ppt_translate_core::types::DEFAULT_MAX_CHARS;
use ppt_translate_core::{locate_fragments, LanguagePair, TranslationOptions, Translator};
use ppt_translate_pptx::{read_text_parts, PptxTranslator};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Translate the slide and speaker notes text of PowerPoint files.
#[derive(Parser, Debug)]
#[command(name = "ppt-translate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code
    #[arg(short, long, default_value = "EN")]
    source: String,

    /// Target language code
    #[arg(short, long, default_value = "RU")]
    target: String,

    /// Character budget per provider request
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Translation provider endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Keep attributes of rewritten <a:t> tags
    #[arg(long)]
    preserve_run_attributes: bool,

    /// List the text runs that would be translated, without translating
    #[arg(short, long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.list {
        for input_path in &args.input {
            if let Err(e) = list_file(input_path) {
                eprintln!("Error reading {}: {:#}", input_path.display(), e);
            }
        }
        return Ok(());
    }

    let languages =
        LanguagePair::from_options(Some(args.source.as_str()), Some(args.target.as_str()));
    let options = TranslationOptions::new()
        .with_max_chars(args.max_chars)
        .with_preserve_run_attributes(args.preserve_run_attributes);
    let provider = ProviderConfig::new().with_endpoint(args.endpoint.clone());
    provider.validate()?;
    let translator = GoogleTranslator::from_config(provider)?;

    let mut failures = 0;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &translator, &options, &languages).await {
            Ok(output_path) => {
                if args.verbose {
                    eprintln!("Written to: {}", output_path.display());
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, args.input.len());
    }

    Ok(())
}

/// Translate a single PowerPoint file and write the result.
async fn process_file(
    input_path: &Path,
    args: &Args,
    translator: &dyn Translator,
    options: &TranslationOptions,
    languages: &LanguagePair,
) -> Result<PathBuf> {
    let data = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let pptx = PptxTranslator::new(translator, options.clone());
    let translated = pptx
        .translate(&data, languages)
        .await
        .with_context(|| format!("Failed to translate {}", input_path.display()))?;

    if args.verbose {
        eprintln!(
            "  {} parts, {} text runs, {} requests",
            translated.report.parts, translated.report.fragments, translated.report.batches
        );
    }

    let output_path = get_output_path(input_path, args.output.as_ref(), languages.target())?;
    write_output(&output_path, &translated.bytes)?;

    Ok(output_path)
}

/// Print every translatable part and its text runs.
fn list_file(input_path: &Path) -> Result<()> {
    let data = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", input_path.display())?;
    list_parts(&data, &mut out)
}

/// Write the decoded text runs of each translatable part of a package.
fn list_parts(data: &[u8], out: &mut impl Write) -> Result<()> {
    for part in read_text_parts(data)? {
        let fragments = locate_fragments(&part.xml);
        writeln!(out, "  {} ({} text runs)", part.name, fragments.len())?;
        for (idx, fragment) in fragments.iter().enumerate() {
            writeln!(out, "    [{}] {}", idx + 1, fragment.decoded_text())?;
        }
    }

    Ok(())
}

/// Determine the output path for a translated file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    target: &str,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}_{}.pptx", stem, target);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
