//! Row pipeline: resolve the name column of every input row.
//!
//! The first row is a header. Every following row is resolved on its own and
//! written back with the corrected name (and optionally the algorithm label)
//! placed according to the [`ColumnLayout`]. Rows that cannot be resolved
//! are left out of the output and reported as warnings.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::matching::engine::ResolutionEngine;
use crate::parsing::tsv::{lossy_lines, split_row, ColumnLayout, INPUT_DELIMITER};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Header has {fields} column(s); name column {column} does not exist")]
    MissingColumn { column: usize, fields: usize },
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Data rows read (header excluded)
    pub rows: usize,
    pub resolved: usize,
    pub exact: usize,
    pub approximate: usize,
    pub unresolved: usize,
}

/// Drives input rows through a resolution engine
pub struct RowPipeline<'a> {
    engine: ResolutionEngine<'a>,
    layout: ColumnLayout,
}

impl<'a> RowPipeline<'a> {
    pub fn new(engine: ResolutionEngine<'a>, layout: ColumnLayout) -> Self {
        Self { engine, layout }
    }

    /// Read rows from `reader` and write resolved rows to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Io` on read or write failures, and
    /// `PipelineError::MissingColumn` if the header lacks the name column.
    /// Rows that fail to resolve are not errors.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> Result<PipelineStats, PipelineError> {
        let mut stats = PipelineStats::default();

        for (k, line) in lossy_lines(reader).enumerate() {
            let mut fields = split_row(&line?);

            if k == 0 {
                if !self.layout.apply_header(&mut fields) {
                    return Err(PipelineError::MissingColumn {
                        column: self.layout.column,
                        fields: fields.len(),
                    });
                }
                write_row(&mut writer, &fields)?;
                continue;
            }

            stats.rows += 1;
            match self.process_row(&mut fields) {
                Some(exact) => {
                    stats.resolved += 1;
                    if exact {
                        stats.exact += 1;
                    } else {
                        stats.approximate += 1;
                    }
                    write_row(&mut writer, &fields)?;
                }
                None => {
                    stats.unresolved += 1;
                    let name = self.layout.name(&fields).unwrap_or_default();
                    warn!("Could not resolve '{name}'!");
                }
            }
        }

        writer.flush()?;
        info!(
            "{} rows: {} resolved ({} exact, {} approximate), {} unresolved",
            stats.rows, stats.resolved, stats.exact, stats.approximate, stats.unresolved
        );
        Ok(stats)
    }

    /// Resolve one data row in place.
    ///
    /// Returns `Some(true)` for an exact match, `Some(false)` for an
    /// approximate one, and `None` if the row was left untouched.
    pub fn process_row(&self, fields: &mut Vec<String>) -> Option<bool> {
        let name = self.layout.name(fields)?;
        let resolution = self.engine.resolve(name)?;
        let exact = resolution.method.is_exact();
        self.layout
            .apply(fields, resolution.accepted, resolution.method.to_string());
        Some(exact)
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[String]) -> io::Result<()> {
    writeln!(writer, "{}", fields.join(&INPUT_DELIMITER.to_string()))
}
