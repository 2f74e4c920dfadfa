//! CSV export of report tables
//!
//! Reports land in the outputs directory as
//! `{REPORT}_AS_OF_{YYYY-MM-DD}_FOR_{SUBJECT}.csv`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{RentalError, RentalResult};
use crate::reports::Report;

/// Write a header row followed by the data rows
pub fn write_csv<W: Write>(writer: W, headers: &[String], rows: &[Vec<String>]) -> RentalResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .map_err(|e| RentalError::Export(format!("Failed to flush CSV output: {}", e)))
}

/// File name (without extension) for a report
pub fn report_file_name(report_type: &str, subject: &str, as_of: NaiveDate) -> String {
    format!("{}_AS_OF_{}_FOR_{}", report_type, as_of.format("%Y-%m-%d"), subject)
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' | ',' | '\n' => '_',
            other => other,
        })
        .collect::<String>()
        .to_uppercase()
}

/// Export a report into `outputs_dir`, returning the file written
pub fn save_report<R: Report>(report: &R, outputs_dir: &Path, as_of: NaiveDate) -> RentalResult<PathBuf> {
    std::fs::create_dir_all(outputs_dir).map_err(|e| {
        RentalError::Export(format!("Failed to create outputs directory: {}", e))
    })?;

    let path = outputs_dir.join(format!(
        "{}.csv",
        report_file_name(report.report_type(), report.subject(), as_of)
    ));
    let file = File::create(&path)
        .map_err(|e| RentalError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    report.export_csv(file)?;

    log::info!("Exported {} report to {}", report.report_type(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Sample;

    impl Report for Sample {
        fn report_type(&self) -> &str {
            "Income Summary"
        }

        fn subject(&self) -> &str {
            "all units"
        }

        fn headers(&self) -> Vec<String> {
            vec!["Year".into(), "Note".into()]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            vec![vec!["2024".into(), "rent, late".into()]]
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            report_file_name("Income Summary", "all units", as_of()),
            "INCOME_SUMMARY_AS_OF_2024-07-01_FOR_ALL_UNITS"
        );
        assert_eq!(
            report_file_name("Payments", "Jane Doe", as_of()),
            "PAYMENTS_AS_OF_2024-07-01_FOR_JANE_DOE"
        );
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let mut output = Vec::new();
        Sample.export_csv(&mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "Year,Note\n2024,\"rent, late\"\n");
    }

    #[test]
    fn test_save_report() {
        let temp_dir = TempDir::new().unwrap();
        let outputs = temp_dir.path().join("outputs");

        let path = save_report(&Sample, &outputs, as_of()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "INCOME_SUMMARY_AS_OF_2024-07-01_FOR_ALL_UNITS.csv"
        );
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("Year,Note"));
    }
}
