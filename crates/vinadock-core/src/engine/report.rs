//! Parsing of the engine's human-readable output.
//!
//! The engine has no machine-readable output mode. Both report kinds start
//! with a fixed-size banner, followed by either a list of `key : value` terms
//! (scoring) or a pose table (docking).

use crate::core::models::data::ScoreRecord;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Lines of banner printed before any result line.
pub const REPORT_HEADER_LINES: usize = 13;

static SCORE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Affinity:|\s{4})").expect("static regex is valid"));
static POSE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+\d\s+").expect("static regex is valid"));

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReportError {
    #[error("Expected a 'name: number' term, found '{0}'")]
    InvalidNumber(String),
    #[error("Pose table row has too few columns: '{0}'")]
    MalformedRow(String),
}

/// One row of the docking pose table, as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseRecord {
    pub affinity: String,
    pub rmsd_lb: String,
    pub rmsd_ub: String,
}

impl PoseRecord {
    pub fn to_score_record(&self) -> Result<ScoreRecord, ReportError> {
        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| ReportError::InvalidNumber(value.to_string()))
        };
        Ok(ScoreRecord::from([
            ("vina_affinity".to_string(), parse(&self.affinity)?),
            ("vina_rmsd_lb".to_string(), parse(&self.rmsd_lb)?),
            ("vina_rmsd_ub".to_string(), parse(&self.rmsd_ub)?),
        ]))
    }
}

fn report_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .split('\n')
        .skip(REPORT_HEADER_LINES)
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

/// Parses `--score_only` output into `vina_<term>` entries.
///
/// Term names lose their spaces and are lower-cased, so `gauss 1` becomes
/// `vina_gauss1`.
pub fn parse_scoring_report(output: &[u8]) -> Result<ScoreRecord, ReportError> {
    let mut record = ScoreRecord::new();
    for line in report_lines(output) {
        if !SCORE_LINE.is_match(&line) {
            continue;
        }
        let compact: String = line.chars().filter(|c| *c != ' ').collect();
        let (key, value) = compact
            .split_once(':')
            .ok_or_else(|| ReportError::InvalidNumber(line.clone()))?;
        let value = value.replace("(kcal/mol)", "");
        let number: f64 = value
            .parse()
            .map_err(|_| ReportError::InvalidNumber(line.clone()))?;
        record.insert(format!("vina_{}", key.to_lowercase()), number);
    }
    Ok(record)
}

/// Parses the pose table of a docking run, in file order.
pub fn parse_docking_report(output: &[u8]) -> Result<Vec<PoseRecord>, ReportError> {
    report_lines(output)
        .into_iter()
        .filter(|line| POSE_ROW.is_match(line))
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [_, affinity, rmsd_lb, rmsd_ub, ..] => Ok(PoseRecord {
                    affinity: affinity.to_string(),
                    rmsd_lb: rmsd_lb.to_string(),
                    rmsd_ub: rmsd_ub.to_string(),
                }),
                _ => Err(ReportError::MalformedRow(line.clone())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner() -> String {
        (1..=REPORT_HEADER_LINES)
            .map(|i| format!("banner line {i}\n"))
            .collect()
    }

    #[test]
    fn scoring_report_yields_affinity_and_terms() {
        let output = format!(
            "{}Affinity: -7.5 (kcal/mol)\n\
             Intermolecular contributions to the terms, before weighting:\n    \
             gauss 1     : 61.375\n    \
             repulsion   : 3.6\n",
            banner()
        );
        let record = parse_scoring_report(output.as_bytes()).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record["vina_affinity"], -7.5);
        assert_eq!(record["vina_gauss1"], 61.375);
        assert_eq!(record["vina_repulsion"], 3.6);
    }

    #[test]
    fn banner_lines_are_never_parsed() {
        let mut output = String::from("Affinity: not-a-number\n");
        output.push_str(&banner()[..]);
        output.push_str("Affinity: -1.0 (kcal/mol)\n");
        // The malformed first line falls inside the banner and is skipped.
        let record = parse_scoring_report(output.as_bytes()).unwrap();
        assert_eq!(record["vina_affinity"], -1.0);
    }

    #[test]
    fn non_numeric_term_is_an_error() {
        let output = format!("{}Affinity: n/a (kcal/mol)\n", banner());
        assert!(matches!(
            parse_scoring_report(output.as_bytes()),
            Err(ReportError::InvalidNumber(_))
        ));
    }

    #[test]
    fn docking_report_rows_become_pose_records() {
        let output = format!(
            "{}mode |   affinity | dist from best mode\n     \
             | (kcal/mol) | rmsd l.b.| rmsd u.b.\n\
             -----+------------+----------+----------\n   \
             1         -9.1      0.000      0.000\n   \
             2         -8.5      1.234      2.345\n   \
             3         -8.0      3.100      5.800\n\
             Writing output ... done.\n",
            banner()
        );
        let records = parse_docking_report(output.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[1],
            PoseRecord {
                affinity: "-8.5".into(),
                rmsd_lb: "1.234".into(),
                rmsd_ub: "2.345".into(),
            }
        );

        let scores = records[2].to_score_record().unwrap();
        assert_eq!(scores["vina_affinity"], -8.0);
        assert_eq!(scores["vina_rmsd_lb"], 3.1);
        assert_eq!(scores["vina_rmsd_ub"], 5.8);
    }

    #[test]
    fn short_pose_row_is_malformed() {
        let output = format!("{}   1         -9.1\n", banner());
        assert!(matches!(
            parse_docking_report(output.as_bytes()),
            Err(ReportError::MalformedRow(_))
        ));
    }

    #[test]
    fn crlf_output_parses() {
        let output = format!("{}Affinity: -2.25 (kcal/mol)\r\n", banner().replace('\n', "\r\n"));
        let record = parse_scoring_report(output.as_bytes()).unwrap();
        assert_eq!(record["vina_affinity"], -2.25);
    }
}
