//! Catalog CLI entry point.
//!
//! # Responsibility
//! - Parse arguments and bootstrap logging.
//! - Wire load -> interactive menu -> save around one catalog instance.

mod menu;

use catalog_core::{
    backup_path_for, default_log_level, init_logging, Catalog, CatalogError, CatalogResult,
};
use clap::Parser;
use log::{info, warn};
use menu::Navigator;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Browse and edit a category/sub-category/item catalog stored in a text file.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the catalog data file (`base.ext`)
    #[arg(short, long, env = "CATALOG_DATA_FILE", default_value = "data.csv")]
    data_file: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "CATALOG_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        if let Err(err) = init_logging(&args.log_level, log_dir) {
            eprintln!("Logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={} data_file={}",
        catalog_core::core_version(),
        args.data_file.display()
    );

    let mut catalog = match open_catalog(&args.data_file) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{}", load_failure_message(&err));
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("****************************");
    println!("Welcome to Catalog Manager");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = Navigator::new(&mut catalog, stdin.lock(), stdout.lock()).run() {
        warn!("event=menu_io module=cli status=error error={err}");
        eprintln!("Terminal error: {err}");
    }

    if let Err(err) = catalog.save_to(&args.data_file) {
        eprintln!("Error saving data");
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    println!();
    ExitCode::SUCCESS
}

/// Loads the data file, or starts empty when it does not exist yet.
///
/// The file name is checked up front so a session never ends with an
/// unsaveable path.
fn open_catalog(path: &Path) -> CatalogResult<Catalog> {
    backup_path_for(path)?;
    let exists = path.try_exists().map_err(|source| CatalogError::Io {
        path: Some(path.to_path_buf()),
        source,
    })?;
    if !exists {
        warn!(
            "event=catalog_open module=cli status=empty reason=missing_file path={}",
            path.display()
        );
        return Ok(Catalog::new());
    }
    Catalog::load_from(path)
}

fn load_failure_message(err: &CatalogError) -> &'static str {
    match err {
        CatalogError::DuplicateKey { .. } => {
            "Duplicate items detected in input data file. Please try again"
        }
        CatalogError::CorruptData { .. } => "Error loading data: the data file is malformed",
        CatalogError::InvalidFileName(_) => {
            "Invalid data file name: expected a name like `data.csv`"
        }
        _ => "Error loading data",
    }
}

#[cfg(test)]
mod tests {
    use super::{load_failure_message, open_catalog};
    use catalog_core::CatalogError;
    use std::fs;

    #[test]
    fn missing_data_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = open_catalog(&dir.path().join("data.csv")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn existing_data_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "header\nTools, Hand, Hammer, \"claw\"\n").unwrap();

        let catalog = open_catalog(&path).unwrap();
        assert!(catalog.has_item("Tools", "Hand", "Hammer"));
    }

    #[test]
    fn invalid_data_file_name_fails_before_session() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["data", "a.b.csv", ".csv"] {
            let path = dir.path().join(name);
            let err = open_catalog(&path).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidFileName(ref bad) if bad == &path));
            assert!(load_failure_message(&err).starts_with("Invalid data file name"));
        }
    }

    #[test]
    fn duplicate_rows_map_to_duplicate_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "header\nA, B, C, d\nA, B, C, e\n").unwrap();

        let err = open_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey { .. }));
        assert!(load_failure_message(&err).starts_with("Duplicate items"));
    }
}
