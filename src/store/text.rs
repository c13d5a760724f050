use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// One text category: a CSV grid whose header lists language codes and whose
/// following records are indexed by text id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Blank lines between records are empty texts and keep their id. The
    /// csv reader skips them, so they are recovered from the bytes between
    /// consecutive records.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut header = None;
        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record)? {
            let cells: Vec<String> = record.iter().map(str::to_string).collect();
            if header.is_none() {
                header = Some(cells);
                continue;
            }

            let start = record
                .position()
                .map_or(data.len(), |pos| pos.byte() as usize)
                .min(data.len());
            let after_cr = start > 0 && data[start - 1] == b'\r';
            let blank = skipped_blank_lines(&data[start..], after_cr);
            rows.extend(std::iter::repeat_n(vec![String::new()], blank));
            rows.push(cells);
        }

        Ok(Self {
            header: header.unwrap_or_default(),
            rows,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn languages(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn has_language(&self, code: &str) -> bool {
        self.header.iter().any(|column| column == code)
    }

    /// Append an empty column for `code`. Short records are padded to the
    /// header width first so the new cell lands in the new column.
    pub fn add_language(&mut self, code: &str) {
        let width = self.header.len();
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row.push(String::new());
        }
        self.header.push(code.to_string());
    }
}

/// Line terminators at the head of `raw`, each one an empty line the reader
/// dropped. A `\n` completing the previous record's `\r\n` is not counted.
fn skipped_blank_lines(raw: &[u8], after_cr: bool) -> usize {
    let mut rest = match raw {
        [b'\n', tail @ ..] if after_cr => tail,
        _ => raw,
    };
    let mut count = 0;
    loop {
        rest = match rest {
            [b'\r', b'\n', tail @ ..] | [b'\n' | b'\r', tail @ ..] => tail,
            _ => return count,
        };
        count += 1;
    }
}

/// CSV files of the text directory, ordered by numeric file id (non-numeric
/// names sort after, by name).
pub fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            files.push(path);
        }
    }

    files.sort_by_key(|path| {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        (stem.parse::<u64>().unwrap_or(u64::MAX), stem)
    });
    Ok(files)
}
