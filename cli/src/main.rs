//! docscrub CLI - document conversion and cleanup tool
//!
//! Converts cached documents and spreadsheets to Markdown and removes
//! internal metadata and annotations from the result.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use docscrub::{BatchReport, CleaningLevel, CleaningStats, Config, JsonDirSource, Processor};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Document conversion to cleaned Markdown
#[derive(Parser)]
#[command(
    name = "docscrub",
    version,
    about = "Convert documents and spreadsheets to cleaned Markdown",
    long_about = "docscrub - Markdown conversion with rule-based cleanup.\n\n\
                  Reads cached Docs/Sheets API responses (<source>/<id>.json), renders them\n\
                  to Markdown and writes an original and a cleaned copy.\n\n\
                  Usage:\n  \
                  docscrub docs <ID>...       Process documents\n  \
                  docscrub sheets <ID>...     Process spreadsheets\n  \
                  docscrub links <FILE>       Process every link found in a text file\n  \
                  docscrub clean <FILE>       Clean a local Markdown file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of cached API responses
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output root (writes <dir>/original and <dir>/docs)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Cleaning level
    #[arg(long, global = true)]
    level: Option<LevelArg>,

    /// Write only the cleaned copy
    #[arg(long, global = true)]
    no_save_original: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process documents by identifier
    Docs {
        /// Document identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Process spreadsheets by identifier
    Sheets {
        /// Spreadsheet identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Process every document and spreadsheet link found in a text file
    Links {
        /// Text file containing URLs
        file: PathBuf,
    },

    /// Clean a local Markdown file
    Clean {
        /// Input Markdown file
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective cleaning rules as JSON
    Rules {
        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

/// Cleaning level
#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    /// Metadata and terms only
    Low,
    /// Adds technical intros and links (default)
    Medium,
    /// Adds CRM references, internal instructions and empty tables
    High,
}

impl From<LevelArg> for CleaningLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => CleaningLevel::Low,
            LevelArg::Medium => CleaningLevel::Medium,
            LevelArg::High => CleaningLevel::High,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Docs { ids } => {
            let source = open_source(&config);
            let processor = Processor::from_config(&config)?;

            let pb = create_spinner(&format!("Processing {} documents...", ids.len()));
            let report = processor.process_documents(&source, &ids)?;
            pb.finish_and_clear();

            print_report("Documents", &report);
            print_summary(report.succeeded(), report.requested);
        }

        Commands::Sheets { ids } => {
            let source = open_source(&config);
            let processor = Processor::from_config(&config)?;

            let pb = create_spinner(&format!("Processing {} spreadsheets...", ids.len()));
            let report = processor.process_spreadsheets(&source, &ids)?;
            pb.finish_and_clear();

            print_report("Spreadsheets", &report);
            print_summary(report.succeeded(), report.requested);
        }

        Commands::Links { file } => {
            let text = fs::read_to_string(&file)?;
            let source = open_source(&config);
            let processor = Processor::from_config(&config)?;

            let pb = create_spinner("Processing links...");
            let report = processor.process_links(&text, &source, &source)?;
            pb.finish_and_clear();

            if report.links.is_empty() {
                println!("{} No document or spreadsheet links found", "!".yellow().bold());
                return Ok(());
            }

            print_report("Documents", &report.documents);
            print_report("Spreadsheets", &report.spreadsheets);
            print_summary(report.succeeded(), report.requested());
        }

        Commands::Clean { input, output } => {
            let processor = Processor::from_config(&config)?;
            let text = fs::read_to_string(&input)?;

            let cleaned = processor.cleaner().clean(&text, processor.level());
            let stats = CleaningStats::compute(&text, &cleaned);

            write_output(output.as_deref(), &cleaned)?;

            if let Some(path) = output {
                println!("{} Cleaned: {}", "✓".green().bold(), path.display());
                print_stats(&stats);
            } else {
                eprintln!("{}: {}", "Stats".bold(), stats);
            }
        }

        Commands::Rules { compact } => {
            let rules = config.registry()?.to_config();
            let json = if compact {
                serde_json::to_string(&rules)?
            } else {
                serde_json::to_string_pretty(&rules)?
            };
            println!("{}", json);
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Loads the configuration file and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    if let Some(ref source) = cli.source {
        config.source_dir = source.clone();
    }
    if let Some(ref dir) = cli.output_dir {
        config.output.original_dir = dir.join("original");
        config.output.cleaned_dir = dir.join("docs");
    }
    if let Some(level) = cli.level {
        config.cleaning.level = CleaningLevel::from(level).as_str().to_string();
    }
    if cli.no_save_original {
        config.output.save_original = false;
    }

    config.validate()?;
    Ok(config)
}

fn open_source(config: &Config) -> JsonDirSource {
    let source = JsonDirSource::new(&config.source_dir);
    log::debug!("Reading cached responses from {}", source.root().display());
    source
}

fn print_report(label: &str, report: &BatchReport) {
    if report.requested == 0 {
        return;
    }

    println!("{}", label.cyan().bold());
    println!("{}", "─".repeat(40));

    for item in &report.items {
        println!(
            "{} {} → {}",
            "✓".green().bold(),
            item.title,
            item.cleaned_path.display()
        );
        print_stats(&item.stats);
    }

    for failure in &report.failures {
        println!("{} {}: {}", "✗".red().bold(), failure.id, failure.error);
    }

    println!();
}

fn print_stats(stats: &CleaningStats) {
    println!("  {}: {} chars", "Original".bold(), stats.original_size);
    println!("  {}: {} chars", "Cleaned".bold(), stats.cleaned_size);
    println!(
        "  {}: {} chars ({:.2}%)",
        "Removed".bold(),
        stats.removed_chars,
        stats.removed_percent
    );
}

fn print_summary(succeeded: usize, requested: usize) {
    let counts = format!("{}/{}", succeeded, requested);
    let counts = if succeeded == requested {
        counts.green().bold()
    } else {
        counts.yellow().bold()
    };
    println!("{}: {} processed", "Summary".bold(), counts);
}

fn print_version() {
    println!("{} {}", "docscrub".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document and spreadsheet conversion to cleaned Markdown");
    println!();
    println!("Cleaning levels: low, medium, high");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "docscrub",
            "docs",
            "a",
            "b",
            "--level",
            "high",
            "--no-save-original",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.cleaning.level, "high");
        assert!(!config.output.save_original);
        assert!(matches!(cli.command, Commands::Docs { ref ids } if ids.len() == 2));
    }

    #[test]
    fn test_output_dir_override() {
        let cli = Cli::try_parse_from(["docscrub", "--output-dir", "out", "rules"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.output.cleaned_dir, PathBuf::from("out/docs"));
        assert_eq!(config.output.original_dir, PathBuf::from("out/original"));
    }

    #[test]
    fn test_source_override() {
        let cli = Cli::try_parse_from(["docscrub", "sheets", "s1", "--source", "cache"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(open_source(&config).root(), Path::new("cache"));
    }

    #[test]
    fn test_docs_requires_ids() {
        assert!(Cli::try_parse_from(["docscrub", "docs"]).is_err());
    }

    #[test]
    fn test_clean_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("in.md");
        let output = temp.path().join("out.md");
        fs::write(&input, "# T\n\nВерсия: 2\n\nТекст").unwrap();

        let cli = Cli::try_parse_from([
            "docscrub",
            "clean",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "# T\n\nТекст");
    }
}
