use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::{
    cli::create_spinner,
    deserialise::{deserialise, DecodeStats},
    parquet,
};

use super::make_parquet_file_name;

/// Decodes `input` and writes the observations to parquet, returning the
/// output path.
pub async fn daily(input: &Path, output: Option<PathBuf>) -> Result<String> {
    let parquet_file_name = output.unwrap_or_else(|| make_parquet_file_name("daily"));

    let decoded = deserialise(input).await?;
    let stats = decoded.stats;
    check_decoded(&stats, input)?;
    if stats.skipped > 0 {
        warn!(skipped = stats.skipped, rows = stats.rows, "Some rows were skipped");
    }

    let bar = create_spinner(format!("Saving {} observations...", decoded.observations.len()));
    parquet::save_daily(&decoded.observations, &parquet_file_name)?;
    bar.finish_with_message("Observations saved");
    info!(path = %parquet_file_name.display(), records = stats.records, "Saved");

    Ok(parquet_file_name.to_string_lossy().to_string())
}

/// Fails unless at least one observation was decoded.
fn check_decoded(stats: &DecodeStats, input: &Path) -> Result<()> {
    if stats.records > 0 {
        return Ok(());
    }

    if stats.rows > 0 {
        bail!(
            "None of the {} rows in {} could be decoded",
            stats.rows,
            input.display()
        );
    }
    if stats.failed_files > 0 {
        bail!(
            "None of the {} files in {} could be read",
            stats.failed_files,
            input.display()
        );
    }
    bail!("No observations found in {}", input.display())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn make_line(month: u32) -> String {
        format!("USC00011084{:04}{:02}TMAX", 2014, month) + &"  125  N".repeat(31)
    }

    #[tokio::test]
    async fn should_convert_file_to_parquet() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("USC00011084.dly");
        let output = dir.path().join("out.parquet");
        fs::write(&input, [make_line(1), make_line(2)].join("\n")).unwrap();

        let saved = daily(&input, Some(output.clone())).await.unwrap();

        assert_eq!(saved, output.to_string_lossy());
        assert!(output.exists());
    }

    #[tokio::test]
    async fn should_fail_when_no_row_decodes() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.dly");
        let output = dir.path().join("out.parquet");
        fs::write(&input, "USC00011084201401TMAX\n").unwrap();

        assert!(daily(&input, Some(output.clone())).await.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn should_fail_on_empty_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty.dly");
        let output = dir.path().join("out.parquet");
        fs::write(&input, "\n\n").unwrap();

        let err = daily(&input, Some(output.clone())).await.unwrap_err();

        assert!(err.to_string().starts_with("No observations found"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn should_fail_when_only_row_is_not_utf8() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("latin1.dly");
        let output = dir.path().join("out.parquet");
        let mut contents = make_line(1).into_bytes();
        contents[40] = 0xE9;
        fs::write(&input, contents).unwrap();

        assert!(daily(&input, Some(output.clone())).await.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn should_fail_when_every_file_failed() {
        let stats = DecodeStats {
            failed_files: 2,
            ..Default::default()
        };

        let err = check_decoded(&stats, Path::new("data")).unwrap_err();

        assert_eq!(err.to_string(), "None of the 2 files in data could be read");
    }

    #[test]
    fn should_accept_any_decoded_record() {
        let stats = DecodeStats {
            rows: 3,
            skipped: 2,
            records: 31,
            failed_files: 1,
        };

        assert!(check_decoded(&stats, Path::new("data")).is_ok());
    }
}
