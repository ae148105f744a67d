//! File-backed catalog load and save.
//!
//! # Responsibility
//! - Build a `Catalog` from a persisted text source, all-or-nothing.
//! - Persist a `Catalog` after moving the previous file to a backup.
//!
//! # Invariants
//! - A failed load never hands a partially populated catalog to the caller.
//! - The backup move completes (or fails) before any new-file write starts.
//! - Invalid data file names are rejected before any file is touched.
//! - Log events carry counts, paths and error codes only, never record
//!   content.

use crate::error::{CatalogError, CatalogResult, KeyLevel};
use crate::format::row::{decode_row, encode_row, read_row, HEADER_ROW};
use crate::model::catalog::Catalog;
use crate::store::backup::{backup_path_for, move_to_backup, BackupOutcome};
use log::{error, info};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

impl Catalog {
    /// Loads a catalog from a data file.
    ///
    /// # Errors
    /// - `Io` when the file cannot be opened or read.
    /// - `CorruptData` when a data row does not have four fields, has a
    ///   blank key field or ends inside a quoted field.
    /// - `DuplicateKey` when two rows name the same record in one group.
    pub fn load_from(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!(
            "event=catalog_load module=store status=start path={}",
            path.display()
        );

        let result = File::open(path)
            .map_err(|err| CatalogError::io_at(path, err))
            .and_then(|file| {
                Self::from_reader(BufReader::new(file)).map_err(|err| match err {
                    CatalogError::Io { path: None, source } => CatalogError::io_at(path, source),
                    other => other,
                })
            });

        match &result {
            Ok(catalog) => info!(
                "event=catalog_load module=store status=ok path={} records={} duration_ms={}",
                path.display(),
                catalog.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=catalog_load module=store status=error path={} duration_ms={} error_code={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    /// Loads a catalog from any line source.
    ///
    /// The first row is a header and is skipped. Blank rows are ignored.
    /// Quoted fields may span lines.
    pub fn from_reader(mut reader: impl BufRead) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        let mut next_line = 1;
        read_row(&mut reader, &mut next_line)?;
        while let Some((line_number, line)) = read_row(&mut reader, &mut next_line)? {
            if line.trim().is_empty() {
                continue;
            }

            let row = decode_row(&line, line_number)?;
            catalog
                .insert_record(&row.category, &row.sub_category, &row.name, &row.description)
                .map_err(|err| match err {
                    CatalogError::EmptyKey(level) => blank_field(line_number, level),
                    other => other,
                })?;
        }
        Ok(catalog)
    }

    /// Writes `HEADER_ROW` and then one row per record.
    ///
    /// Returns the number of data rows written.
    pub fn to_writer(&self, mut writer: impl Write) -> CatalogResult<usize> {
        Ok(write_rows(self, &mut writer)?)
    }

    /// Saves the catalog to `path`, keeping the previous file as a backup.
    ///
    /// The file always starts with `HEADER_ROW`, since loading skips the
    /// first row.
    ///
    /// The previous file is moved to `{base}_bak.{ext}` in the same
    /// directory. A missing previous file skips the backup step. The write
    /// itself is not atomic: on failure the backup is the only complete copy
    /// and the in-memory catalog is left as is.
    ///
    /// # Errors
    /// - `InvalidFileName` when the file name does not have exactly one `.`.
    /// - `Io` when the backup move or any write fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> CatalogResult<()> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!(
            "event=catalog_save module=store status=start path={} records={}",
            path.display(),
            self.len()
        );

        let result = self.save_with_backup(path);
        match &result {
            Ok(rows) => info!(
                "event=catalog_save module=store status=ok path={} rows={} duration_ms={}",
                path.display(),
                rows,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=catalog_save module=store status=error path={} duration_ms={} error_code={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result.map(|_| ())
    }

    fn save_with_backup(&self, path: &Path) -> CatalogResult<usize> {
        let backup_path = backup_path_for(path)?;
        match move_to_backup(path, &backup_path)? {
            BackupOutcome::Moved => info!(
                "event=catalog_backup module=store status=ok path={} backup_path={}",
                path.display(),
                backup_path.display()
            ),
            BackupOutcome::SourceMissing => info!(
                "event=catalog_backup module=store status=skipped reason=source_missing path={}",
                path.display()
            ),
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| CatalogError::io_at(path, err))?;
        let mut writer = BufWriter::new(file);
        let rows = write_rows(self, &mut writer).map_err(|err| CatalogError::io_at(path, err))?;
        writer
            .flush()
            .map_err(|err| CatalogError::io_at(path, err))?;
        Ok(rows)
    }
}

fn write_rows(catalog: &Catalog, writer: &mut impl Write) -> std::io::Result<usize> {
    writeln!(writer, "{HEADER_ROW}")?;
    let mut rows = 0;
    for (category, sub_category, record) in catalog.entries() {
        writeln!(
            writer,
            "{}",
            encode_row(category, sub_category, record.name(), record.description())
        )?;
        rows += 1;
    }
    Ok(rows)
}

fn blank_field(line: usize, level: KeyLevel) -> CatalogError {
    CatalogError::CorruptData {
        line,
        message: format!("{level} field is blank"),
    }
}
