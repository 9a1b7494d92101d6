use bzip2::read::BzDecoder;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lexeme_render::batch::{render_stream, BatchConfig, Stats};
use lexeme_render::{bold, escape_for_bolding, romanize, summarize, translate, LocaleCatalog};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lexeme-render")]
#[command(about = "Render wiki markup, headword lists and homograph titles for dictionary entries")]
struct Args {
    /// Locale for message templates and list conjunctions
    #[arg(short, long, global = true, default_value = "en")]
    locale: String,

    /// Locale catalog YAML file (default: built-in catalog)
    #[arg(long, global = true)]
    locales: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate wiki markup to HTML, line by line from stdin if no text is given
    Translate { text: Option<String> },

    /// Bold text without breaking pipe-linked wikilinks
    Bold {
        text: Option<String>,

        /// Print the bolded wiki markup instead of HTML
        #[arg(long)]
        raw: bool,
    },

    /// Print a number as a Roman numeral (1-3999)
    Roman { number: usize },

    /// Join headword forms into a sentence ("A, B, or C")
    Summarize {
        #[arg(required = true)]
        forms: Vec<String>,
    },

    /// Render a JSONL file of lexeme records into JSONL display strings
    Render {
        /// Input JSONL file (.jsonl or .jsonl.bz2)
        input: PathBuf,

        /// Output JSONL file
        output: PathBuf,

        /// Number of threads (0 = auto-detect)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Limit number of records to render (for testing)
        #[arg(long)]
        limit: Option<usize>,

        /// Quiet mode - minimal output
        #[arg(short, long)]
        quiet: bool,
    },
}

fn for_each_input_line(text: Option<String>, mut render: impl FnMut(&str) -> String) -> io::Result<()> {
    match text {
        Some(text) => println!("{}", render(&text)),
        None => {
            for line in io::stdin().lock().lines() {
                println!("{}", render(&line?));
            }
        }
    }
    Ok(())
}

fn open_input(path: &PathBuf) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    Ok(if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    })
}

fn print_stats(stats: &Stats) {
    println!();
    println!("============================================================");
    println!("Records read: {}", stats.records_read);
    println!("Records written: {}", stats.records_written);
    println!("Homograph groups: {}", stats.homograph_groups);
    println!("Failed: {}", stats.failed);
    println!("Time: {:.2}s", stats.elapsed.as_secs_f64());
    println!(
        "Rate: {:.0} records/sec",
        stats.records_read as f64 / stats.elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("============================================================");
}

fn run(args: Args) -> lexeme_render::Result<()> {
    let loaded;
    let catalog = match &args.locales {
        Some(path) => {
            loaded = LocaleCatalog::from_path(path)?;
            &loaded
        }
        None => LocaleCatalog::builtin(),
    };
    let locale = catalog.get(&args.locale);

    match args.command {
        Command::Translate { text } => for_each_input_line(text, translate)?,

        Command::Bold { text, raw } => {
            if raw {
                for_each_input_line(text, escape_for_bolding)?
            } else {
                for_each_input_line(text, bold)?
            }
        }

        Command::Roman { number } => println!("{}", romanize(number)?),

        Command::Summarize { forms } => println!("{}", summarize(&forms, locale)),

        Command::Render { input, output, threads, limit, quiet } => {
            let mut config = BatchConfig::default();
            if threads > 0 {
                config.num_threads = threads;
            }
            config.limit = limit;

            if !quiet {
                println!("Rendering: {}", input.display());
                println!("Output: {}", output.display());
                println!("Locale: {}", locale.code);
                println!("Threads: {}", config.num_threads);
                if let Some(limit) = limit {
                    println!("Limit: {} records", limit);
                }
            }

            let reader = open_input(&input)?;
            let writer = BufWriter::with_capacity(256 * 1024, File::create(&output)?);

            let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new_spinner() };
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
                pb.set_style(style);
            }
            pb.set_message("Rendering records...");
            pb.enable_steady_tick(Duration::from_millis(100));

            let stats = render_stream(reader, writer, locale, &config)?;
            pb.finish_and_clear();

            if !quiet {
                print_stats(&stats);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
