//! bookflow CLI - document ingestion and pagination tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use bookflow::render::BufferSurface;
use bookflow::{
    classify, DisplayFormat, ExtractionProgress, ReaderSession, UploadOutcome, UploadedFile,
};

#[derive(Parser)]
#[command(name = "bookflow")]
#[command(version)]
#[command(about = "Ingest PDF, EPUB, and TXT documents and page through them", long_about = None)]
struct Cli {
    /// Input file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file and display one page
    Read {
        /// Input file (PDF, EPUB, or TXT)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page to display (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Display format
        #[arg(short, long, value_enum, default_value = "standard")]
        format: FormatArg,
    },

    /// Show document information
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the full extracted text
    Text {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the extracted document as JSON
    Json {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Regular reading view
    Standard,
    /// Dyslexic-friendly view
    Dyslexic,
    /// Large print
    Large,
    /// High contrast
    Contrast,
}

impl From<FormatArg> for DisplayFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Standard => DisplayFormat::Standard,
            FormatArg::Dyslexic => DisplayFormat::Dyslexic,
            FormatArg::Large => DisplayFormat::Large,
            FormatArg::Contrast => DisplayFormat::Contrast,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Read {
            input,
            page,
            format,
        }) => cmd_read(&input, page, format),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Json { input, compact }) => cmd_json(&input, compact),
        None => {
            if let Some(input) = cli.input {
                cmd_read(&input, 1, FormatArg::Standard)
            } else {
                println!("{}", "Usage: bookflow <FILE>".yellow());
                println!("       bookflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Progress bar wired as the extraction progress sink.
fn progress_bar() -> (ProgressBar, impl FnMut(&ExtractionProgress)) {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    let sink_pb = pb.clone();
    let sink = move |p: &ExtractionProgress| {
        sink_pb.set_position(p.percent as u64);
        sink_pb.set_message(p.message.clone());
    };
    (pb, sink)
}

fn cmd_read(
    input: &Path,
    page: usize,
    format: FormatArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = UploadedFile::from_path(input)?;
    let mut session = ReaderSession::new(BufferSurface::new());

    let (pb, mut sink) = progress_bar();
    let outcome = session.upload(file, &mut sink)?;
    pb.finish_and_clear();

    let nav = match outcome {
        UploadOutcome::AwaitingFormat { .. } => {
            let UploadOutcome::Ready { notice, nav } = session.select_format(format.into())?
            else {
                return Err("format selection did not produce a document".into());
            };
            println!("{}", notice.green());
            Some(nav)
        }
        UploadOutcome::Ready { notice, nav } => {
            println!("{}", notice.green());
            // Non-PDF uploads render Standard by default; apply the
            // requested transform on top.
            if format != FormatArg::Standard {
                Some(session.set_format(format.into())?)
            } else {
                Some(nav)
            }
        }
        UploadOutcome::Delegated { notice } => {
            println!("{}", notice.green());
            None
        }
    };

    if let Some(mut nav) = nav {
        if page != nav.current_page {
            nav = session.jump_to(page)?;
            if nav.current_page != page {
                eprintln!(
                    "{}: page {} is out of range, showing page {}",
                    "warning".yellow(),
                    page,
                    nav.current_page
                );
            }
        }
        println!("{}", "─".repeat(40).dimmed());
        print_surface(session.surface());
        println!("{}", "─".repeat(40).dimmed());

        let prev = if nav.prev_enabled { "previous" } else { "previous (disabled)" };
        let next = if nav.next_enabled { "next" } else { "next (disabled)" };
        println!(
            "{}  [{} | {}]",
            nav.label().cyan().bold(),
            prev.dimmed(),
            next.dimmed()
        );
    } else {
        println!("{}", "─".repeat(40).dimmed());
        print_surface(session.surface());
    }

    Ok(())
}

fn print_surface(surface: &BufferSurface) {
    if let Some(frame) = surface.frame() {
        println!("{}", frame.text);
    } else if let Some((title, message)) = surface.error() {
        println!("{}: {}", title.red().bold(), message);
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = UploadedFile::from_path(input)?;
    let format = classify(&file.mime, &file.name);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Declared MIME".bold(), file.mime);
    match format {
        Some(f) => println!("{}: {}", "Format".bold(), f),
        None => {
            println!("{}: {}", "Format".bold(), "unsupported".red());
            return Ok(());
        }
    }

    let doc = match bookflow::extract_document(input) {
        Ok(doc) => doc,
        Err(bookflow::Error::Other(_)) => {
            // EPUB: delegated rendering, no page model to report on.
            println!("{}: delegated to the EPUB renderer", "Pages".bold());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}: {}", "Pages".bold(), doc.page_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let words: usize = text.split_whitespace().count();
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), text.len());

    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = bookflow::extract_text(input)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_json(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = bookflow::extract_document(input)?;

    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{}", json);

    Ok(())
}
