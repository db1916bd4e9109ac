//! endoc CLI - proposal template to Word document generator
//!
//! Reads a declarative XML proposal template and writes the Word document it
//! describes. The output path comes from the template itself (the root
//! element's `docName` attribute).

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use endoc::Block;

/// Template read when no path is given on the command line.
const DEFAULT_TEMPLATE: &str = "proposal.xml";

/// Generate Word documents from XML proposal templates
#[derive(Parser)]
#[command(
    name = "endoc",
    version,
    about = "Generate Word documents from XML proposal templates",
    long_about = "endoc - XML proposal templates to Word documents.\n\n\
                  Reads a declarative template (titles, section paragraphs, tables,\n\
                  page breaks, header/footer text) and writes the .docx file named\n\
                  by the template's docName attribute."
)]
struct Cli {
    /// Input template file (default: proposal.xml)
    #[arg(value_name = "TEMPLATE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Word document described by a template
    #[command(visible_alias = "gen")]
    Generate {
        /// Input template file (default: proposal.xml)
        #[arg(value_name = "TEMPLATE")]
        input: Option<PathBuf>,
    },

    /// Show a summary of a parsed template without writing output
    Info {
        /// Input template file (default: proposal.xml)
        #[arg(value_name = "TEMPLATE")]
        input: Option<PathBuf>,

        /// Print the parsed document model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let default_input = cli.input.clone();

    match cli.command {
        None => generate(resolve_input(None, default_input)),
        Some(Commands::Generate { input }) => generate(resolve_input(input, default_input)),
        Some(Commands::Info { input, json }) => info(resolve_input(input, default_input), json),
        Some(Commands::Version) => {
            print_version();
            Ok(())
        }
    }
}

/// Pick the template path: subcommand argument, then top-level argument, then
/// the conventional default.
fn resolve_input(sub: Option<PathBuf>, top: Option<PathBuf>) -> PathBuf {
    sub.or(top).unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE))
}

fn generate(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Parsing template...");

    let proposal = endoc::parse_file(&input)?;
    pb.set_message("Writing document...");

    let out = PathBuf::from(&proposal.doc_name);
    endoc::docx::write_file(&proposal.document, &out)?;

    pb.finish_and_clear();
    println!(
        "{} Generated document: {}",
        "✓".green().bold(),
        out.display()
    );

    Ok(())
}

fn info(input: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Parsing template...");
    let proposal = endoc::parse_file(&input)?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&proposal.document)?);
        return Ok(());
    }

    let doc = &proposal.document;
    let mut paragraphs = 0;
    let mut tables = 0;
    let mut page_breaks = 0;
    for block in &doc.content {
        match block {
            Block::Paragraph(_) => paragraphs += 1,
            Block::Table(_) => tables += 1,
            Block::PageBreak => page_breaks += 1,
        }
    }

    println!("{}", "Template Information".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "Template".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Output".bold(), proposal.doc_name);
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Tables".bold(), tables);
    println!("{}: {}", "Page breaks".bold(), page_breaks);
    if let Some(header) = &doc.header {
        println!("{}: {}", "Header".bold(), header.plain_text());
    }
    if let Some(footer) = &doc.footer {
        println!("{}: {}", "Footer".bold(), footer.plain_text());
    }

    let text = doc.plain_text();
    let word_count = text.split_whitespace().count();
    println!("\n{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Words".bold(), word_count);
    println!("{}: {}", "Characters".bold(), text.len());

    Ok(())
}

fn print_version() {
    println!("{} {}", "endoc".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("XML proposal templates to Word documents");
    println!();
    println!("Repository: https://github.com/iyulab/endoc");
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
