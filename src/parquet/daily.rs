//! Save daily observations to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Builder, Float64Builder, StringBuilder},
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use parquet::{
    arrow::ArrowWriter,
    basic::{Compression, ZstdLevel},
    file::properties::WriterProperties,
};
use tracing::debug;

use crate::{cli::create_progress_bar, reading::Observation};

const CHUNK_SIZE: usize = 100_000;

/// Long format: one row per station, date and element.
pub fn daily_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("element", DataType::Utf8, false),
        Field::new("value", DataType::Float64, true),
        Field::new("sflag", DataType::Utf8, true),
        Field::new("mflag", DataType::Utf8, true),
        Field::new("qflag", DataType::Utf8, true),
    ]))
}

pub fn save_daily(observations: &[Observation], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)
        .with_context(|| format!("Failed to create {}", file_path.display()))?;

    let schema = daily_schema();
    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::default()))
        .set_dictionary_enabled(true)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
    let pb = create_progress_bar(observations.len() as u64, "Writing parquet file".to_string());

    let mut batch = BatchBuilder::with_capacity(CHUNK_SIZE.min(observations.len()));
    for (written, chunk) in observations.chunks(CHUNK_SIZE).enumerate() {
        for observation in chunk {
            batch.append(observation);
        }
        writer.write(&batch.finish(&schema)?)?;

        let rows = written * CHUNK_SIZE + chunk.len();
        pb.set_position(rows as u64);
        debug!(rows, "Wrote parquet batch");
    }

    pb.finish_with_message("Finished writing Parquet file");
    writer.close()?;
    Ok(())
}

struct BatchBuilder {
    id: StringBuilder,
    date: Date32Builder,
    element: StringBuilder,
    value: Float64Builder,
    sflag: StringBuilder,
    mflag: StringBuilder,
    qflag: StringBuilder,
}

impl BatchBuilder {
    fn with_capacity(rows: usize) -> Self {
        BatchBuilder {
            id: StringBuilder::with_capacity(rows, rows * 11),
            date: Date32Builder::with_capacity(rows),
            element: StringBuilder::with_capacity(rows, rows * 4),
            value: Float64Builder::with_capacity(rows),
            sflag: StringBuilder::with_capacity(rows, rows),
            mflag: StringBuilder::with_capacity(rows, rows),
            qflag: StringBuilder::with_capacity(rows, rows),
        }
    }

    fn append(&mut self, observation: &Observation) {
        self.id.append_value(&observation.id);
        self.date.append_value(days_since_epoch(observation.date));
        self.element.append_value(&observation.element);
        self.value.append_option(observation.value);
        append_flag(&mut self.sflag, observation.sflag);
        append_flag(&mut self.mflag, observation.mflag);
        append_flag(&mut self.qflag, observation.qflag);
    }

    /// Drains the builders into a batch; they are ready for reuse afterwards.
    fn finish(&mut self, schema: &SchemaRef) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(self.id.finish()),
            Arc::new(self.date.finish()),
            Arc::new(self.element.finish()),
            Arc::new(self.value.finish()),
            Arc::new(self.sflag.finish()),
            Arc::new(self.mflag.finish()),
            Arc::new(self.qflag.finish()),
        ];

        Ok(RecordBatch::try_new(schema.clone(), columns)?)
    }
}

fn append_flag(builder: &mut StringBuilder, flag: Option<char>) {
    match flag {
        Some(flag) => builder.append_value(flag.encode_utf8(&mut [0; 4])),
        None => builder.append_null(),
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::fs;

    use arrow::array::{Array, Date32Array, Float64Array, StringArray};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::NamedTempFile;

    use super::*;

    fn observation(day: u32, value: Option<f64>, mflag: Option<char>) -> Observation {
        Observation {
            id: "US1FLAL0004".to_string(),
            date: NaiveDate::from_ymd_opt(2014, 9, day).unwrap(),
            element: "PRCP".to_string(),
            value,
            sflag: value.map(|_| 'N'),
            mflag,
            qflag: None,
        }
    }

    #[test]
    fn should_count_days_from_unix_epoch() {
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), -1);
    }

    #[test]
    fn should_round_trip_observations() {
        let observations = vec![
            observation(1, Some(0.8), None),
            observation(14, Some(0.0), Some('T')),
            observation(18, None, None),
        ];
        let temp_file = NamedTempFile::new().unwrap();

        save_daily(&observations, temp_file.path()).unwrap();

        let file = fs::File::open(temp_file.path()).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];

        let schema = batch.schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec!["id", "date", "element", "value", "sflag", "mflag", "qflag"]
        );
        assert_eq!(schema.field(3).data_type(), &DataType::Float64);
        assert_eq!(batch.num_rows(), 3);

        let dates = batch.column(1).as_any().downcast_ref::<Date32Array>().unwrap();
        let values = batch.column(3).as_any().downcast_ref::<Float64Array>().unwrap();
        let sflags = batch.column(4).as_any().downcast_ref::<StringArray>().unwrap();
        let mflags = batch.column(5).as_any().downcast_ref::<StringArray>().unwrap();
        let qflags = batch.column(6).as_any().downcast_ref::<StringArray>().unwrap();

        assert_eq!(dates.value(0), days_since_epoch(observations[0].date));
        assert_eq!(values.value(0), 0.8);
        assert!(values.is_null(2));
        assert_eq!(sflags.value(0), "N");
        assert!(sflags.is_null(2));
        assert_eq!(mflags.value(1), "T");
        assert!(mflags.is_null(0));
        assert_eq!(qflags.null_count(), 3);
    }

    #[test]
    fn should_write_in_batches() {
        let observations: Vec<_> = (0..CHUNK_SIZE + 10)
            .map(|i| observation(1 + (i % 30) as u32, Some(i as f64), None))
            .collect();
        let temp_file = NamedTempFile::new().unwrap();

        save_daily(&observations, temp_file.path()).unwrap();

        let file = fs::File::open(temp_file.path()).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        assert_eq!(
            builder.metadata().file_metadata().num_rows() as usize,
            CHUNK_SIZE + 10
        );
    }

    #[test]
    fn should_write_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();

        save_daily(&[], temp_file.path()).unwrap();

        let file = fs::File::open(temp_file.path()).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        assert_eq!(builder.metadata().file_metadata().num_rows(), 0);
    }
}
