pub mod daily;
pub mod elements;

use std::path::PathBuf;

use chrono::{Datelike, Local};
pub use daily::daily;
pub use elements::elements;

/// `~/ghcnd-<period>-YYYY-MM-DD.parquet`, or the working directory when there
/// is no home directory.
pub fn make_parquet_file_name(period: &str) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "ghcnd-{}-{}-{:02}-{:02}.parquet",
        period,
        today.year(),
        today.month(),
        today.day()
    );

    dirs::home_dir().unwrap_or_default().join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_make_dated_file_name() {
        let path = make_parquet_file_name("daily");
        let name = path.file_name().unwrap().to_string_lossy();

        assert!(name.starts_with("ghcnd-daily-"));
        assert!(name.ends_with(".parquet"));
        assert_eq!(name.len(), "ghcnd-daily-YYYY-MM-DD.parquet".len());
    }
}
