//! ungremlin CLI - text sanitization tool
//!
//! Reads UTF-8 text files, runs them through the normalization pipeline,
//! and writes the cleaned result.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Clean mojibake, invisible Unicode, and AI artifacts out of text files
#[derive(Parser)]
#[command(
    name = "ungremlin",
    version,
    about = "Clean mojibake, invisible Unicode, and AI artifacts out of text files",
    long_about = "ungremlin - text sanitization tool.\n\n\
                  Repairs mis-decoded byte sequences, strips invisible and\n\
                  control characters, removes AI formatting noise, and\n\
                  normalizes whitespace.\n\n\
                  Usage:\n  \
                  ungremlin <file>            Clean to <file>.cleaned.txt\n  \
                  ungremlin <file> <output>   Clean to the given path\n  \
                  ungremlin batch <files...>  Clean many files in parallel"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (for default cleaning)
    input: Option<PathBuf>,

    /// Output file path (default: input with a .cleaned.txt extension)
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a single file (default command)
    Clean {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: input with a .cleaned.txt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clean many files in parallel
    Batch {
        /// Input file paths
        files: Vec<PathBuf>,

        /// Directory for cleaned files (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        None => {
            if let Some(input) = cli.input {
                run_clean(&input, cli.output.as_deref())
            } else {
                use clap::CommandFactory;
                Cli::command().print_help()?;
                Ok(())
            }
        }
        Some(Commands::Clean { input, output }) => run_clean(&input, output.as_deref()),
        Some(Commands::Batch { files, output_dir }) => run_batch(&files, output_dir.as_deref()),
    }
}

fn run_clean(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let cleaned = ungremlin::normalize_file(input)?;

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };
    fs::write(&output_path, cleaned)?;

    println!(
        "{} Cleaned {} -> {}",
        "✓".green().bold(),
        input.display(),
        output_path.display()
    );
    Ok(())
}

fn run_batch(files: &[PathBuf], output_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files given".into());
    }

    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    // Read everything up front so per-file I/O errors are reported before
    // any output is written.
    let mut readable: Vec<(usize, String)> = Vec::with_capacity(files.len());
    let mut failures = 0usize;
    for (index, file) in files.iter().enumerate() {
        match ungremlin::read_text_file(file) {
            Ok(text) => readable.push((index, text)),
            Err(e) => {
                eprintln!("{}: {}: {}", "Error".red().bold(), file.display(), e);
                failures += 1;
            }
        }
    }

    let pb = create_spinner(&format!("Cleaning {} files...", readable.len()));
    let contents: Vec<&str> = readable.iter().map(|(_, t)| t.as_str()).collect();
    let cleaned = ungremlin::normalize_batch(&contents);
    pb.finish_and_clear();

    for ((index, _), output_text) in readable.iter().zip(cleaned) {
        let input = &files[*index];
        let output_path = match output_dir {
            Some(dir) => dir.join(default_output_name(input)),
            None => default_output_path(input),
        };
        if let Err(e) = fs::write(&output_path, output_text) {
            eprintln!("{}: {}: {}", "Error".red().bold(), output_path.display(), e);
            failures += 1;
        }
    }

    let succeeded = files.len() - failures;
    println!(
        "{} Cleaned {} of {} files",
        "✓".green().bold(),
        succeeded,
        files.len()
    );

    if failures > 0 {
        return Err(format!("{failures} file(s) failed").into());
    }
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// `test.txt` becomes `test.cleaned.txt`; extensionless inputs get the
/// suffix appended.
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("cleaned.txt")
}

fn default_output_name(input: &Path) -> PathBuf {
    PathBuf::from(default_output_path(input).file_name().unwrap_or_default())
}
