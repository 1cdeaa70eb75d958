use clap::{Parser, Subcommand};
use xliffcodec_cli::{
    check::{load_document, run_validate_command},
    edit::{run_add_command, run_new_command},
    stats::print_stats,
    view::print_view,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check an XLIFF file for structural consistency.
    Validate {
        /// The XLIFF file to check
        #[arg(short, long)]
        input: String,
    },

    /// View the files and trans-units of an XLIFF file.
    View {
        /// The XLIFF file to view
        #[arg(short, long)]
        input: String,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,

        /// Dump the document model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show translation progress per file.
    Stats {
        /// The XLIFF file to inspect
        #[arg(short, long)]
        input: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new, empty XLIFF file.
    New {
        /// The file to create
        #[arg(short, long)]
        output: String,

        /// Language of the source text (e.g. "de")
        #[arg(long)]
        source_language: String,

        /// Language of the translations (e.g. "en")
        #[arg(long)]
        target_language: String,

        /// Value for the file's `original` attribute
        #[arg(long)]
        original: Option<String>,
    },

    /// Append a trans-unit to the last file of an XLIFF file.
    Add {
        /// The XLIFF file to edit
        #[arg(short, long)]
        input: String,

        /// Source text of the new trans-unit
        #[arg(short, long)]
        source: String,

        /// Optional translation
        #[arg(short, long)]
        target: Option<String>,

        /// Optional note for translators
        #[arg(short, long)]
        note: Option<String>,

        /// Write to this file instead of editing in place
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.commands {
        Commands::Validate { input } => match run_validate_command(&input) {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => exit_on_error(Err(e)),
        },
        Commands::View { input, full, json } => {
            exit_on_error(load_document(&input).and_then(|doc| print_view(&doc, full, json)));
        }
        Commands::Stats { input, json } => {
            exit_on_error(load_document(&input).map(|doc| print_stats(&doc, json)));
        }
        Commands::New {
            output,
            source_language,
            target_language,
            original,
        } => {
            exit_on_error(run_new_command(
                output,
                source_language,
                target_language,
                original,
            ));
        }
        Commands::Add {
            input,
            source,
            target,
            note,
            output,
        } => {
            exit_on_error(run_add_command(input, source, target, note, output));
        }
    }
}
