use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Diagnostic, RecordReport, RecordStatus};

/// Counts shown in the summary box.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub diagnostics: usize,
}

impl Summary {
    pub fn from_reports(reports: &[RecordReport]) -> Self {
        let mut summary = Summary {
            total: reports.len(),
            ..Summary::default()
        };
        for report in reports {
            match &report.status {
                RecordStatus::Extracted { diagnostics, .. } => {
                    summary.extracted += 1;
                    summary.diagnostics += diagnostics.len();
                }
                RecordStatus::Skipped => summary.skipped += 1,
                RecordStatus::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Render a colored terminal report.
pub fn render(reports: &[RecordReport], verbose: bool, quiet: bool) -> Result<()> {
    let summary = Summary::from_reports(reports);

    if quiet {
        println!(
            "Records: {}  Extracted: {}  Skipped: {}  Failed: {}  Diagnostics: {}",
            summary.total,
            summary.extracted.to_string().green(),
            summary.skipped.to_string().dimmed(),
            summary.failed.to_string().red(),
            summary.diagnostics.to_string().yellow(),
        );
        return Ok(());
    }

    println!("\n {} v{}\n", "mods-migrate".bold(), env!("CARGO_PKG_VERSION"));

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Records            : {:>5}", summary.total));
    println!(
        " │  {:<48} │",
        format!("{}  Extracted       : {:>5}", "✓".green(), summary.extracted)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Skipped (stub)  : {:>5}", "-".dimmed(), summary.skipped)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Diagnostics     : {:>5}", "⚠".yellow(), summary.diagnostics)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Failed          : {:>5}", "✗".red(), summary.failed)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if summary.failed > 0 {
        println!(" {} Records that could not be extracted:\n", "[ERROR]".red().bold());
        render_failures(reports);
        println!();
    }

    if summary.diagnostics > 0 {
        println!(" {} Values needing review:\n", "[WARN]".yellow().bold());
        render_diagnostics(reports);
        println!();
    }

    if verbose && summary.extracted > 0 {
        println!(" {} Extracted fields:\n", "[OK]".green().bold());
        render_fields(reports);
        println!();
    }

    Ok(())
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn render_failures(reports: &[RecordReport]) {
    let mut table = new_table(&["PID", "Error"]);
    for report in reports {
        if let RecordStatus::Failed { error } = &report.status {
            table.add_row(vec![Cell::new(&report.pid), Cell::new(error).fg(Color::Red)]);
        }
    }
    println!("{}", table);
}

fn render_diagnostics(reports: &[RecordReport]) {
    let mut table = new_table(&["PID", "Kind", "Detail"]);
    for report in reports {
        let RecordStatus::Extracted { diagnostics, .. } = &report.status else {
            continue;
        };
        for diagnostic in diagnostics {
            let color = match diagnostic {
                Diagnostic::UnrecognizedRole { .. } => Color::DarkYellow,
                _ => Color::Yellow,
            };
            table.add_row(vec![
                Cell::new(&report.pid),
                Cell::new(diagnostic.kind()).fg(color),
                Cell::new(diagnostic.to_string()),
            ]);
        }
    }
    println!("{}", table);
}

fn render_fields(reports: &[RecordReport]) {
    let mut table = new_table(&["PID", "Field", "Value"]);
    for report in reports {
        let RecordStatus::Extracted { fields, .. } = &report.status else {
            continue;
        };
        for (field, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
            table.add_row(vec![
                Cell::new(&report.pid),
                Cell::new(field.as_str()),
                Cell::new(value),
            ]);
        }
    }
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, NormalizedRecord};

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            RecordReport {
                pid: "a:1".to_string(),
                status: RecordStatus::Extracted {
                    fields: NormalizedRecord::default(),
                    diagnostics: vec![Diagnostic::NonConformingDate {
                        field: Field::EdtfDateIssued,
                        value: "1990-??".to_string(),
                    }],
                },
            },
            RecordReport {
                pid: "a:2".to_string(),
                status: RecordStatus::Skipped,
            },
            RecordReport {
                pid: "a:3".to_string(),
                status: RecordStatus::Failed {
                    error: "missing required element <titleInfo>".to_string(),
                },
            },
        ];

        assert_eq!(
            Summary::from_reports(&reports),
            Summary {
                total: 3,
                extracted: 1,
                skipped: 1,
                failed: 1,
                diagnostics: 1,
            }
        );
    }
}
