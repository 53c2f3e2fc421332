use std::io::Write;

use anyhow::Result;

use crate::models::RecordReport;

/// Write all records as a pretty-printed JSON array.
pub fn render<W: Write>(reports: &[RecordReport], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;
    use crate::mods::Extractor;

    #[test]
    fn test_render_records() {
        let extraction = Extractor::default()
            .extract("<mods><titleInfo><title>T</title></titleInfo></mods>")
            .unwrap();
        let reports = vec![
            RecordReport {
                pid: "demo:1".to_string(),
                status: RecordStatus::Extracted {
                    fields: extraction.record,
                    diagnostics: extraction.diagnostics,
                },
            },
            RecordReport {
                pid: "demo:2".to_string(),
                status: RecordStatus::Skipped,
            },
        ];

        let mut out = Vec::new();
        render(&reports, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json[0]["pid"], "demo:1");
        assert_eq!(json[0]["status"], "extracted");
        assert_eq!(json[0]["fields"]["title"], "T");
        assert_eq!(json[0]["fields"]["field_related_item"], "");
        assert_eq!(json[1]["status"], "skipped");
    }
}
