// src/export/logic.rs

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{CycleFilter, load_cycles};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::CycleExport;
use crate::export::range::parse_optional_range;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// High level export of archived cycles.
pub struct ExportLogic;

impl ExportLogic {
    /// Export archived cycles.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute output path (`~/` is expanded)
    /// - `range`: `None`, `"all"` or a period/range accepted by `parse_range`
    ///
    /// Returns the number of exported cycles.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let filter = CycleFilter {
            dates: parse_optional_range(range)?,
            ..CycleFilter::default()
        };

        let rows: Vec<CycleExport> = load_cycles(pool, &filter)?
            .iter()
            .map(CycleExport::from)
            .collect();

        if rows.is_empty() {
            warning("No cycles found for the selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        if let Err(e) = ttlog(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("Exported {} cycle(s) to {}", rows.len(), path.display()),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(rows.len())
    }
}
