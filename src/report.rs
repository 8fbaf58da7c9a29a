use anyhow::{Context, Result};
use arrow::{record_batch::RecordBatch, util::pretty::pretty_format_batches};
use std::fmt::Write;

use crate::mapping::Diagnostics;

/// Warnings then errors, one per line, each section headed by its count.
pub fn render_diagnostics(diagnostics: &Diagnostics) -> String {
    if diagnostics.is_empty() {
        return "No warnings or errors.\n".to_string();
    }
    let mut out = String::new();
    for (title, messages) in [
        ("Warnings", &diagnostics.warnings),
        ("Errors", &diagnostics.errors),
    ] {
        if messages.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{} ({}):", title, messages.len());
        for m in messages {
            let _ = writeln!(out, "  - {}", m);
        }
    }
    out
}

/// The first `rows` rows of `batch` as a text table.
pub fn render_preview(batch: &RecordBatch, rows: usize) -> Result<String> {
    let head = batch.slice(0, rows.min(batch.num_rows()));
    let table = pretty_format_batches(&[head]).context("formatting preview")?;
    Ok(format!(
        "{}\n{} of {} rows shown\n",
        table,
        rows.min(batch.num_rows()),
        batch.num_rows()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::utf8_batch;

    #[test]
    fn test_render_diagnostics_sections() {
        let diag = Diagnostics::new(
            vec!["row 2: duplicate lab id 'L1'".into()],
            vec!["unmatched lab id 'L3'".into(), "unmatched lab id 'L3'".into()],
        );
        assert_eq!(
            render_diagnostics(&diag),
            "Warnings (1):\n  - row 2: duplicate lab id 'L1'\n\
             Errors (2):\n  - unmatched lab id 'L3'\n  - unmatched lab id 'L3'\n"
        );
    }

    #[test]
    fn test_render_diagnostics_empty() {
        assert_eq!(
            render_diagnostics(&Diagnostics::default()),
            "No warnings or errors.\n"
        );
    }

    #[test]
    fn test_render_preview_limits_rows() -> Result<()> {
        let batch = utf8_batch(&[("ID_PRODUIT", vec![Some("P1"), Some("P2"), Some("P3")])]);
        let preview = render_preview(&batch, 2)?;
        assert!(preview.contains("P1"));
        assert!(preview.contains("P2"));
        assert!(!preview.contains("P3"));
        assert!(preview.ends_with("2 of 3 rows shown\n"));
        Ok(())
    }
}
