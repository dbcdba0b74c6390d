//! CSV input and output for the CLI.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pedgene_model::IndexedFrame;
use polars::prelude::*;

/// Read a CSV file, using `index` as the row-index column if given.
pub fn read_csv_file(path: &Path, index: Option<&str>) -> Result<IndexedFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("parse {}", path.display()))?;

    let frame = match index {
        Some(name) => IndexedFrame::with_index(df, name)
            .with_context(|| format!("index {}", path.display()))?,
        None => IndexedFrame::positional(df),
    };
    Ok(frame)
}

/// Write a frame as CSV to `output`, or to stdout when `None`.
///
/// Positional frames are written without an index column.
pub fn write_csv(frame: IndexedFrame, output: Option<&Path>) -> Result<()> {
    let mut data = frame.into_data();
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_to(&mut data, file).with_context(|| format!("write {}", path.display()))
        }
        None => write_to(&mut data, io::stdout().lock()).context("write stdout"),
    }
}

fn write_to<W: Write>(data: &mut DataFrame, mut writer: W) -> Result<()> {
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(data)?;
    writer.flush()?;
    Ok(())
}
