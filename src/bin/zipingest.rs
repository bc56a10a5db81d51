//! zipingest CLI - Turn a directory, zip, Git repository or URL into an LLM digest.

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use owo_colors::{AnsiColors, OwoColorize};
use tracing::debug;
use zipingest::binary::DEFAULT_MAX_FILE_SIZE;
use zipingest::builder::Ingest;
use zipingest::clipboard::copy_to_clipboard;
use zipingest::errors::{exit_code, IngestError};
use zipingest::logging::init_logging;
use zipingest::output::TreeStyle;
use zipingest::select::select_files;
use zipingest::source::SourceType;

#[derive(Parser)]
#[command(name = "zipingest")]
#[command(about = "Transform zip files, directories, Git repos and URLs into LLM-friendly digests")]
#[command(version)]
struct Cli {
    /// Zip file, directory, Git URL, or web URL
    #[arg(required_unless_present = "completions")]
    source: Option<String>,

    /// Write the digest to a file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include patterns (glob); only matching files are kept
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    include: Vec<String>,

    /// Exclude patterns (glob)
    #[arg(short, long, num_args = 1.., value_delimiter = ',')]
    exclude: Vec<String>,

    /// Max file size in bytes; larger files are treated as binary
    #[arg(short = 's', long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_size: u64,

    /// Copy the digest to the clipboard
    #[arg(short, long)]
    clipboard: bool,

    /// Pick files interactively before formatting
    #[arg(long)]
    interactive: bool,

    /// Skip the directory tree
    #[arg(long)]
    no_tree: bool,

    /// Skip the stats header
    #[arg(long)]
    no_stats: bool,

    /// Render the tree as a sorted list of file paths
    #[arg(long)]
    flat_tree: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "zipingest", &mut std::io::stdout());
        return;
    }

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("warning: logging unavailable: {}", e);
    }

    if let Err(e) = run(cli) {
        status(&format!("Error: {}", e), AnsiColors::Red);
        std::process::exit(exit_code(&e));
    }
}

/// Print a status line to stderr, coloured when stderr is a terminal.
fn status(message: &str, color: AnsiColors) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.color(color));
    } else {
        eprintln!("{}", message);
    }
}

fn run(cli: Cli) -> Result<(), IngestError> {
    let tree_style = if cli.flat_tree {
        TreeStyle::Flat
    } else {
        TreeStyle::Ascii
    };

    let builder = Ingest::new(cli.source.unwrap_or_default())
        .include(cli.include)
        .exclude(cli.exclude)
        .max_file_size(cli.max_size)
        .include_tree(!cli.no_tree)
        .include_stats(!cli.no_stats)
        .tree_style(tree_style);

    let mut loaded = builder.load()?;
    debug!(
        files = loaded.root.file_count(),
        bytes = loaded.root.size(),
        "source loaded"
    );

    if cli.interactive {
        if loaded.source_type == SourceType::Url {
            status(
                "Interactive mode is only available for directories, zip files and Git repositories.",
                AnsiColors::Yellow,
            );
        } else {
            match select_files(&loaded.root)? {
                Some(root) => loaded.root = root,
                None => {
                    status("No files selected.", AnsiColors::Yellow);
                    return Ok(());
                }
            }
        }
    }

    let digest = builder.render(&loaded);

    if let Some(path) = cli.output {
        fs::write(&path, &digest)?;
        status(&format!("Output saved to: {}", path.display()), AnsiColors::Green);
    } else if cli.clipboard {
        copy_to_clipboard(&digest)?;
        status("Output copied to clipboard!", AnsiColors::Green);
    } else {
        println!("{}", digest);
    }

    Ok(())
}
