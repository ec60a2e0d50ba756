//! Apache Parquet output format.

use arrow::array::{Float64Array, Int64Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;
use tickbar_aggregate::Ohlcv;
use tickbar_types::Tick;

use crate::{BAR_COLUMNS, FormatError, Formatter, TICK_COLUMNS};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    fn timestamp_field(name: &str) -> Field {
        Field::new(
            name,
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        )
    }

    /// Builds a schema from `columns`: a UTC timestamp first, then one
    /// float column per price and a trailing integer count.
    fn schema(columns: &[&str]) -> Schema {
        let last = columns.len() - 1;
        let fields = columns.iter().enumerate().map(|(i, name)| match i {
            0 => Self::timestamp_field(name),
            i if i == last => Field::new(*name, DataType::Int64, false),
            _ => Field::new(*name, DataType::Float64, false),
        });
        Schema::new(fields.collect::<Vec<_>>())
    }

    fn tick_schema() -> Schema {
        Self::schema(&TICK_COLUMNS)
    }

    fn bar_schema() -> Schema {
        Self::schema(&BAR_COLUMNS)
    }

    /// Converts ticks to Arrow RecordBatch.
    fn ticks_to_batch(schema: &Arc<Schema>, ticks: &[Tick]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = ticks
            .iter()
            .map(|t| t.timestamp.timestamp_micros())
            .collect();
        let prices: Vec<_> = ticks.iter().map(|t| t.price).collect();
        let sizes: Vec<_> = ticks.iter().map(|t| t.size).collect();

        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
                Arc::new(Float64Array::from(prices)),
                Arc::new(Int64Array::from(sizes)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts OHLCV bars to Arrow RecordBatch.
    fn bars_to_batch(schema: &Arc<Schema>, bars: &[Ohlcv]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = bars
            .iter()
            .map(|b| b.timestamp.timestamp_micros())
            .collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();

        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Int64Array::from(volumes)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Writes `records` in row-group sized chunks using `to_batch`.
    fn write_chunked<T, W, F>(
        &self,
        schema: Schema,
        records: &[T],
        writer: W,
        to_batch: F,
    ) -> Result<(), FormatError>
    where
        W: Write + Send,
        F: Fn(&Arc<Schema>, &[T]) -> Result<RecordBatch, FormatError>,
    {
        let schema = Arc::new(schema);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in records.chunks(self.row_group_size) {
            let batch = to_batch(&schema, chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError> {
        self.write_chunked(Self::bar_schema(), bars, writer, Self::bars_to_batch)
    }

    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_chunked(Self::tick_schema(), ticks, writer, Self::ticks_to_batch)
    }
}
