use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use libfrench::Engine;
use serde::Serialize;
use tracing::{debug, warn};

/// Counters reported after a labeling run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LabelStats {
    pub records: usize,
    pub skipped: usize,
    pub rows: usize,
    pub unclassified: usize,
}

/// Label `old\tnew\tcount` records.
///
/// Writes one row per diff unit:
/// `alignedOld\talignedNew\tcount\tdiffCount\tfragOld\tfragNew\tlabels`,
/// with `labels` as a JSON array. Pairs without differences write nothing.
pub fn label_records<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    engine: &Engine,
) -> Result<LabelStats> {
    let mut stats = LabelStats::default();

    for (idx, line_res) in reader.lines().enumerate() {
        let lineno = idx + 1;
        let line = line_res.with_context(|| format!("reading line {}", lineno))?;
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 3 {
            warn!(line = lineno, "skipping record with fewer than three fields");
            stats.skipped += 1;
            continue;
        }
        let (old, new, count) = (parts[0].trim(), parts[1].trim(), parts[2].trim());
        stats.records += 1;

        let (alignment, classification) = engine
            .label_pair(old, new)
            .with_context(|| format!("labeling line {} ({} / {})", lineno, old, new))?;
        debug!(line = lineno, old, new, diffs = classification.count(), "labeled");

        let aligned_old = alignment.old_string();
        let aligned_new = alignment.new_string();
        let diff_count = classification.count();
        for diff in classification.iter() {
            if !diff.is_classified() {
                stats.unclassified += 1;
            }
            let labels = serde_json::to_string(&diff.labels)?;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                aligned_old, aligned_new, count, diff_count, diff.old, diff.new, labels
            )?;
            stats.rows += 1;
        }
    }

    writer.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (String, LabelStats) {
        let engine = Engine::default();
        let mut out = Vec::new();
        let stats = label_records(input.as_bytes(), &mut out, &engine).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn one_row_per_diff_unit() {
        let (out, stats) = run("teste\ttête\t12\n");
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].split('\t').collect();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], "teste");
        assert_eq!(fields[1], "tê¤te");
        assert_eq!(fields[2], "12");
        assert_eq!(fields[3], "1");
        assert_eq!(fields[4], "es");
        assert_eq!(fields[5], "ê¤");
        let labels: Vec<String> = serde_json::from_str(fields[6]).unwrap();
        assert!(!labels.is_empty());
        assert_eq!(stats.records, 1);
        assert_eq!(stats.rows, 1);
    }

    #[test]
    fn identical_pairs_write_nothing() {
        let (out, stats) = run("roi\troi\t3\n");
        assert!(out.is_empty());
        assert_eq!(stats.records, 1);
        assert_eq!(stats.rows, 0);
    }

    #[test]
    fn short_records_are_skipped() {
        let (out, stats) = run("roy\troi\n\nteste\ttête\t1\n");
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.records, 1);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn every_row_repeats_the_pair() {
        let (out, stats) = run("vne\tune\t5\nfaict\tfait\t2\n");
        assert_eq!(stats.records, 2);
        assert_eq!(stats.rows, 2);
        let rows: Vec<Vec<&str>> = out.lines().map(|r| r.split('\t').collect()).collect();
        assert_eq!(rows[0][..6], ["vne", "une", "5", "1", "v", "u"]);
        assert_eq!(rows[1][..6], ["faict", "fai¤t", "2", "1", "ct", "¤t"]);
    }

    #[test]
    fn unclassified_units_have_empty_label_arrays() {
        let (out, stats) = run("kat\tqat\t1\n");
        assert!(stats.unclassified >= 1);
        assert!(out.lines().any(|row| row.ends_with("\t[]")));
    }
}
