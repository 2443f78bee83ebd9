//! dupdetail - Duplicate record viewer.
//!
//! Loads a dataset (table schema, rows, collaborators, duplicate groups) and
//! either opens the interactive viewer or prints the detail of one or all
//! groups as plain text.
//!
//! Usage:
//!   dupdetail data.json                       # interactive viewer
//!   dupdetail data.json --group "Alice"       # open a group directly
//!   dupdetail data.json --print               # print every group
//!   dupdetail data.json --print -g 2          # print the second group
//!   dupdetail data.json --deleted-out out.json --log-file dupdetail.log

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use dupdetail::format::{CellFormatter, DefaultThumbnailResolver, FormatOptions};
use dupdetail::host::DuplicateStore;
use dupdetail::model::{Dataset, DuplicateGroup};
use dupdetail::tui::App;
use dupdetail::util::parse_utc_offset;
use dupdetail::view::DetailView;

/// Width of the row name column in `--print` output.
const PRINT_NAME_WIDTH: usize = 20;

/// Interactive viewer for duplicate records.
#[derive(Parser)]
#[command(name = "dupdetail", about = "Duplicate record viewer")]
struct Args {
    /// Dataset JSON file.
    #[arg(value_name = "DATASET")]
    dataset: PathBuf,

    /// Group to open: the duplicated value, or its 1-based position.
    #[arg(short = 'g', long, value_name = "GROUP")]
    group: Option<String>,

    /// Print the detail of the group (or of every group) and exit.
    #[arg(short = 'p', long)]
    print: bool,

    /// Offset used to display zoned timestamps, e.g. +02:00 or Z.
    #[arg(long, value_name = "OFFSET", default_value = "Z")]
    utc_offset: String,

    /// Edge length of image thumbnails in pixels.
    #[arg(long, value_name = "PX", default_value_t = dupdetail::format::DEFAULT_THUMBNAIL_SIZE)]
    thumbnail_size: u32,

    /// Server prefix of internal asset URLs.
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Write the ids of deleted rows as a JSON array on exit.
    #[arg(long, value_name = "PATH")]
    deleted_out: Option<PathBuf>,

    /// Write logs to this file (the viewer owns the terminal).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Redraw interval of the viewer in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 250)]
    tick_ms: u64,
}

fn main() {
    let args = Args::parse();

    // Flushes buffered log lines when dropped.
    let log_guard = match init_logging(args.verbose, args.quiet, args.log_file.as_deref(), args.print) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error opening log file: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(message) = run(args) {
        eprintln!("Error: {}", message);
        drop(log_guard);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let utc_offset = parse_utc_offset(&args.utc_offset).map_err(|e| e.to_string())?;
    let format_options = FormatOptions { utc_offset };
    let thumbnails = DefaultThumbnailResolver {
        server: args.server.clone(),
        size: args.thumbnail_size,
    };

    let dataset = Dataset::from_path(&args.dataset)
        .map_err(|e| format!("loading '{}': {}", args.dataset.display(), e))?;

    let group_index = match args.group.as_deref() {
        Some(query) => Some(
            find_group(&dataset.duplication_groups, query)
                .ok_or_else(|| format!("no duplicate group matches '{}'", query))?,
        ),
        None => None,
    };

    if args.print {
        return print_groups(&dataset, group_index, &thumbnails, format_options)
            .map_err(|e| e.to_string());
    }

    let store = DuplicateStore::new(dataset).map_err(|e| e.to_string())?;

    let mut app = App::new(store, thumbnails, format_options);
    if let Some(idx) = group_index {
        app.open_group(idx);
    }

    let store = app
        .run(Duration::from_millis(args.tick_ms.max(10)))
        .map_err(|e| format!("running TUI: {}", e))?;

    if let Some(path) = args.deleted_out.as_deref() {
        write_deleted(path, store.deleted())
            .map_err(|e| format!("writing '{}': {}", path.display(), e))?;
        info!(path = %path.display(), count = store.deleted().len(), "deleted row ids written");
    }
    Ok(())
}

/// Initializes tracing. Logs go to `log_file` when given (through a
/// non-blocking writer whose guard must outlive the program), to stderr in
/// print mode, and nowhere otherwise.
fn init_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
    print: bool,
) -> io::Result<Option<WorkerGuard>> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("dupdetail={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder.with_ansi(false).with_writer(writer).init();
            Ok(Some(guard))
        }
        None if print => {
            builder.with_writer(io::stderr).init();
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Finds a group by duplicated value, falling back to a 1-based position.
fn find_group(groups: &[DuplicateGroup], query: &str) -> Option<usize> {
    groups.iter().position(|g| g.value == query).or_else(|| {
        query
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=groups.len()).contains(n))
            .map(|n| n - 1)
    })
}

/// Prints one group, or every group, as plain text to stdout.
fn print_groups(
    dataset: &Dataset,
    group_index: Option<usize>,
    thumbnails: &DefaultThumbnailResolver,
    options: FormatOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = dataset.active_table()?;
    let formatter = CellFormatter::new(&dataset.collaborators, thumbnails, options);

    let groups: Vec<&DuplicateGroup> = match group_index {
        Some(idx) => dataset.duplication_groups.get(idx).into_iter().collect(),
        None => dataset.duplication_groups.iter().collect(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== {} ({} rows) ==", group.value, group.count())?;
        let view = DetailView::build(table, group, &formatter);
        write!(out, "{}", view.to_text(PRINT_NAME_WIDTH))?;
    }
    out.flush()?;
    Ok(())
}

fn write_deleted(path: &Path, deleted: &[String]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(deleted)?;
    std::fs::write(path, json + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_group_by_value_or_position() {
        let groups = vec![
            DuplicateGroup::new("Alice", vec!["r1".into(), "r2".into()]),
            DuplicateGroup::new("2", vec!["r3".into(), "r4".into()]),
        ];
        assert_eq!(find_group(&groups, "Alice"), Some(0));
        assert_eq!(find_group(&groups, "2"), Some(1));
        assert_eq!(find_group(&groups, "1"), Some(0));
        assert_eq!(find_group(&groups, "3"), None);
        assert_eq!(find_group(&groups, "Bob"), None);
    }

    #[test]
    fn log_file_receives_lines_once_guard_drops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dupdetail.log");
        let guard = init_logging(0, false, Some(&path), false).unwrap();
        assert!(guard.is_some());
        info!(groups = 2, "dataset loaded");
        drop(guard);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("dataset loaded"));
        assert!(written.contains("groups=2"));
    }

    #[test]
    fn deleted_ids_are_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deleted.json");
        write_deleted(&path, &["r1".to_string(), "r2".to_string()]).unwrap();
        let written: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, vec!["r1", "r2"]);
    }
}
