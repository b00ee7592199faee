use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::ReportContext;
use crate::report::json::render_summary_json;
use crate::report::latex::render_latex;
use crate::report::text::render_report_text;

pub const REPORT_FILE: &str = "report.txt";
pub const LATEX_FILE: &str = "kappa_table.tex";
pub const SUMMARY_FILE: &str = "summary.json";

/// Text report followed by the LaTeX tables, as printed to stdout.
pub fn render_console(ctx: &ReportContext<'_>) -> String {
    let mut out = render_report_text(ctx);
    out.push('\n');
    out.push_str(&"=".repeat(80));
    out.push('\n');
    out.push_str("LATEX TABLES FOR THESIS\n");
    out.push_str(&"=".repeat(80));
    out.push_str("\n\n");
    out.push_str(&render_latex(ctx));
    out
}

pub fn write_reports(ctx: &ReportContext<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let report_path = out_dir.join(REPORT_FILE);
    write_text(&report_path, &render_report_text(ctx))?;

    let latex_path = out_dir.join(LATEX_FILE);
    write_text(&latex_path, &render_latex(ctx))?;

    let summary_path = out_dir.join(SUMMARY_FILE);
    let json = render_summary_json(ctx).map_err(std::io::Error::other)?;
    write_text(&summary_path, &json)?;

    tracing::info!("wrote reports to {}", out_dir.display());
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
