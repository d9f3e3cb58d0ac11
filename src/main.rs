//! CLI entry point for lister

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use lister::{
    Flags, IdentityCache, JsonFormatter, ListError, Lister, OutputConfig, Renderer, TextFormatter,
    sort_paths, strip_unknown_flags,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lister")]
#[command(about = "List directory contents")]
#[command(version)]
struct Args {
    /// Files and directories to list
    paths: Vec<PathBuf>,

    /// Use the long listing format
    #[arg(short = 'l')]
    long_listing: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    recursive: bool,

    /// Do not ignore entries starting with '.'
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Reverse order while sorting
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// Sort by modification time, newest first
    #[arg(short = 't')]
    sort_by_time: bool,

    /// Do not list entries matching a glob pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Print all names on a single line
    #[arg(long = "compact", conflicts_with = "json")]
    compact: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LISTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let (argv, unknown) = strip_unknown_flags(std::env::args_os());
    for flag in unknown {
        eprintln!("lister: warning: ignoring unknown flag '{}'", flag);
    }
    let args = Args::parse_from(argv);

    let flags = Flags {
        show_all: args.all,
        long_listing: args.long_listing,
        recursive: args.recursive,
        reverse: args.reverse,
        sort_by_time: args.sort_by_time,
    };

    let mut paths = args.paths.clone();
    if paths.is_empty() {
        paths.push(PathBuf::from("."));
    } else if paths.len() > 1 {
        sort_paths(&mut paths);
    }

    let lister = Lister::new(flags).with_ignore_patterns(&args.ignore);

    let result = if args.json {
        let mut formatter = JsonFormatter::new(io::stdout().lock(), IdentityCache::system());
        lister.run(&paths, &mut formatter)
    } else {
        let use_color = should_use_color(args.color);
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let renderer = Renderer::new(OutputConfig {
            use_color,
            compact: args.compact,
        });
        let mut formatter = TextFormatter::new(StandardStream::stdout(choice), renderer, flags);
        lister.run(&paths, &mut formatter)
    };

    match result {
        Ok(()) => {}
        Err(ListError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("lister: {}", e);
            process::exit(1);
        }
    }
}
