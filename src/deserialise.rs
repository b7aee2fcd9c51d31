//! Reads `.dly` files from disk and decodes every row into observations.
//!
//! Malformed rows are logged and skipped; whether that is acceptable is the
//! caller's decision, made from the returned [`DecodeStats`].

use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    str,
};

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::{
    cli::create_progress_bar,
    error::DecodeError,
    reading::{self, element, Observation},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Non-blank rows read.
    pub rows: usize,
    /// Rows skipped because they failed to decode.
    pub skipped: usize,
    /// Observations produced.
    pub records: usize,
    /// Files that could not be read.
    pub failed_files: usize,
}

impl DecodeStats {
    fn merge(&mut self, other: DecodeStats) {
        self.rows += other.rows;
        self.skipped += other.skipped;
        self.records += other.records;
        self.failed_files += other.failed_files;
    }
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub observations: Vec<Observation>,
    pub stats: DecodeStats,
}

impl Decoded {
    fn append(&mut self, other: Decoded) {
        self.stats.merge(other.stats);
        self.observations.extend(other.observations);
    }
}

/// Decode every row of `reader`. `source` names the input in log messages.
pub fn decode_reader<R: BufRead>(reader: R, source: &str) -> Result<Decoded> {
    let mut decoded = Decoded::default();
    let mut unknown_elements = BTreeSet::new();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let line_number = index + 1;
        let bytes =
            bytes.with_context(|| format!("Failed to read line {} of {}", line_number, source))?;
        if bytes.trim_ascii().is_empty() {
            continue;
        }

        decoded.stats.rows += 1;
        let Ok(line) = str::from_utf8(&bytes) else {
            decoded.stats.skipped += 1;
            warn!(
                source,
                line = line_number,
                error = %DecodeError::NonAscii,
                "Skipping malformed row"
            );
            continue;
        };

        match reading::decode(line) {
            Ok(observations) => {
                let element = &observations.header().element;
                if !element::is_known(element) {
                    unknown_elements.insert(element.clone());
                }
                decoded.stats.records += observations.len();
                decoded.observations.extend(observations);
            }
            Err(e) => {
                decoded.stats.skipped += 1;
                warn!(source, line = line_number, error = %e, "Skipping malformed row");
            }
        }
    }

    for element in unknown_elements {
        debug!(source, element = %element, "Undocumented element decoded as tenths");
    }

    Ok(decoded)
}

pub fn decode_file(path: &Path) -> Result<Decoded> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    decode_reader(BufReader::new(file), &path.to_string_lossy())
}

/// `path` itself if it is a file, otherwise the `.dly` files in the
/// directory sorted by name.
pub fn dly_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = path
        .read_dir()
        .with_context(|| format!("Failed to read directory {}", path.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, io::Error>>()?;

    files.retain(|file| {
        file.is_file()
            && file
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("dly"))
    });
    files.sort();

    Ok(files)
}

/// Decode a `.dly` file, or every `.dly` file in a directory, concurrently.
///
/// Observations are returned in file name order. A file that cannot be read
/// is logged and counted in [`DecodeStats::failed_files`].
pub async fn deserialise(path: &Path) -> Result<Decoded> {
    let files = dly_files(path)?;
    if files.is_empty() {
        bail!("No .dly files found in {}", path.display());
    }
    info!(files = files.len(), path = %path.display(), "Decoding");

    let progress_bar = create_progress_bar(files.len() as u64, "Decoding files".to_string());

    let tasks: Vec<_> = files
        .iter()
        .map(|file| {
            let file = file.clone();
            let pb = progress_bar.clone();
            tokio::task::spawn_blocking(move || {
                let result = decode_file(&file);
                pb.inc(1);
                result
            })
        })
        .collect();

    let mut decoded = Decoded::default();
    for (file, result) in files.iter().zip(join_all(tasks).await) {
        match result.context("Decoding task failed")? {
            Ok(file_decoded) => decoded.append(file_decoded),
            Err(e) => {
                error!(file = %file.display(), error = %e, "Failed to decode file");
                decoded.stats.failed_files += 1;
            }
        }
    }
    progress_bar.finish_with_message("Decoding complete");

    let stats = decoded.stats;
    info!(
        rows = stats.rows,
        skipped = stats.skipped,
        records = stats.records,
        failed_files = stats.failed_files,
        "Decoded"
    );

    Ok(decoded)
}

// -- Tests -------------------------------------------------------------------
