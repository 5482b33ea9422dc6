//! Report output helpers

use std::io::Write;

use crate::error::{MergeError, Result};
use crate::merge::MergeReport;

/// Write the whole report as prettified JSON.
pub fn write_report_json(report: &MergeReport, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    w.write_all(json.as_bytes()).map_err(stream_err)?;
    w.write_all(b"\n").map_err(stream_err)?;
    Ok(())
}

/// Write one JSON object per merged source (NDJSON).
pub fn write_report_ndjson(report: &MergeReport, mut w: impl Write) -> Result<()> {
    for source in &report.sources {
        let line = serde_json::to_string(source)?;
        w.write_all(line.as_bytes()).map_err(stream_err)?;
        w.write_all(b"\n").map_err(stream_err)?;
    }
    Ok(())
}

fn stream_err(source: std::io::Error) -> MergeError {
    MergeError::WriteOutput {
        path: "-".into(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::SourceStats;
    use std::path::PathBuf;

    fn sample_report() -> MergeReport {
        let stats = |name: &str, kept: usize| SourceStats {
            path: PathBuf::from(name),
            lines_read: kept + 3,
            lines_kept: kept,
            lines_dropped: 3,
        };

        MergeReport {
            output: PathBuf::from("../yuri.h"),
            guard: "LIBYURI_YURI_H_".to_string(),
            sources: vec![stats("reflect.h", 10), stats("serializer.h", 4)],
            lines_written: 17,
        }
    }

    #[test]
    fn ndjson_writes_one_line_per_source() {
        let mut buf = Vec::new();

        write_report_ndjson(&sample_report(), &mut buf).expect("write ndjson");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: SourceStats = serde_json::from_str(lines[1]).expect("parse");
        assert_eq!(parsed.path, PathBuf::from("serializer.h"));
        assert_eq!(parsed.lines_kept, 4);
    }

    #[test]
    fn json_parses_back_into_a_report() {
        let mut buf = Vec::new();

        write_report_json(&sample_report(), &mut buf).expect("write json");

        let parsed: MergeReport = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(parsed, sample_report());
    }
}
