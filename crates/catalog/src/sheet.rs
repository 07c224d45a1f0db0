//! Tab-separated sheet codec.
//!
//! Each sheet of the catalog workbook is a `.tsv` file:
//! - line 1 is the header row
//! - every following non-blank line is a data row
//! - cells are separated by a single tab, with no quoting
//!
//! Rows may be shorter than the header (trailing empty cells are often
//! dropped by spreadsheet exports); reads of missing cells return "".

use crate::error::{CatalogError, Result};
use std::fs;
use std::path::Path;

/// An in-memory sheet: header plus rows of raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Parse sheet text. `name` is used for error messages only.
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)));

        let (_, header_line) = lines.next().ok_or_else(|| CatalogError::ParseError {
            file: name.to_string(),
            line: 1,
            reason: "Missing header row".to_string(),
        })?;
        let header: Vec<String> = split_cells(header_line);

        let rows = lines
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(_, line)| split_cells(line))
            .collect();

        Ok(Self {
            name: name.to_string(),
            header,
            rows,
        })
    }

    /// Read and parse a sheet file
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CatalogError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&name, &text)
    }

    /// Serialize back to sheet text.
    ///
    /// Fails without producing output if any cell would break the format.
    pub fn to_tsv(&self) -> Result<String> {
        let mut out = String::new();
        for line in std::iter::once(&self.header).chain(self.rows.iter()) {
            for (idx, cell) in line.iter().enumerate() {
                if cell.contains(['\t', '\n', '\r']) {
                    return Err(CatalogError::InvalidValue {
                        field: format!("{} cell", self.name),
                        value: cell.clone(),
                    });
                }
                if idx > 0 {
                    out.push('\t');
                }
                out.push_str(cell);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Write the whole sheet to `path` in one call
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = self.to_tsv()?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Index of the first header cell equal to `column` (surrounding whitespace ignored)
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| CatalogError::MissingColumn {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Index of `column`, appending it to the header if absent
    pub fn ensure_column(&mut self, column: &str) -> usize {
        match self.column_index(column) {
            Some(idx) => idx,
            None => {
                self.header.push(column.to_string());
                self.header.len() - 1
            }
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Set a cell, padding the row with empty cells if it is too short.
    /// Out-of-range rows are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if let Some(r) = self.rows.get_mut(row) {
            if r.len() <= col {
                r.resize(col + 1, String::new());
            }
            r[col] = value.into();
        }
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}
