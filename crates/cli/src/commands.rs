use std::io::Write;

use anyhow::{Context, Result};
use anne_core::Annotator;

const UNSET: &str = "-";

pub fn show(annotator: &Annotator, limit: Option<usize>, out: &mut impl Write) -> Result<()> {
    let page = annotator.load_page()?;
    let config = &page.config;
    let shown = limit.unwrap_or(page.rows.len()).min(page.rows.len());
    for (index, row) in page.rows.iter().take(shown).enumerate() {
        writeln!(out, "#{index}")?;
        for (label, column) in [
            (&config.labels.left, &config.columns.left),
            (&config.labels.right, &config.columns.right),
            (&config.annotation_column, &config.annotation_column),
        ] {
            let text = row.text(column).unwrap_or_else(|| UNSET.to_string());
            writeln!(out, "  {label}: {}", indent_continuation(&text))?;
        }
    }
    if shown < page.rows.len() {
        writeln!(out, "... {} more", page.rows.len() - shown)?;
    }
    Ok(())
}

pub fn status(annotator: &Annotator, out: &mut impl Write) -> Result<()> {
    let progress = annotator.progress()?;
    writeln!(out, "{}/{} annotated", progress.annotated, progress.total)?;
    Ok(())
}

pub fn annotate(
    annotator: &Annotator,
    index: &str,
    label: &str,
    out: &mut impl Write,
) -> Result<()> {
    let ack = annotator
        .submit(index, label)
        .with_context(|| format!("failed to annotate row {index}"))?;
    writeln!(out, "saved {} on row {} of {}", ack.column, ack.index, ack.total)?;
    Ok(())
}

pub fn check(annotator: &Annotator, out: &mut impl Write) -> Result<()> {
    let page = annotator.load_page()?;
    writeln!(
        out,
        "ok: {} records in {}",
        page.rows.len(),
        page.config.data_path().display()
    )?;
    Ok(())
}

fn indent_continuation(text: &str) -> String {
    text.replace('\n', "\n    ")
}
