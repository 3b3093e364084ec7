use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{
    LaunchRecord, LaunchTable, COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE, REQUIRED_COLUMNS,
};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row containing the four required columns (recommended)
/// * `.json`    – `[{ "Launch Site": ..., "class": ..., ... }, ...]`
/// * `.parquet` – one column per required field
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading launch table from {}", path.display()))?;

    log::debug!(
        "{}: {} records, payload {}..={} kg",
        path.display(),
        table.len(),
        table.min_payload(),
        table.max_payload()
    );
    Ok(table)
}

/// One serialized row. Columns outside these four are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<LaunchRecord, DataError> {
        LaunchRecord::try_new(
            row,
            self.site,
            self.class,
            self.payload_mass_kg,
            self.booster_category,
        )
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Pandas exports with an unnamed index column load fine.
fn load_csv(path: &Path) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataError::MissingColumn(col).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 0.0,
///     "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON records")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| raw.into_record(row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Numeric columns may use any integer or float width; they are cast to
/// `Int64` (class) and `Float64` (payload) before reading.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, &mut records)?;
    }

    Ok(LaunchTable::from_records(records))
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column_as(batch, COL_SITE, &DataType::Utf8)?;
    let classes = column_as(batch, COL_CLASS, &DataType::Int64)?;
    let payloads = column_as(batch, COL_PAYLOAD, &DataType::Float64)?;
    let boosters = column_as(batch, COL_BOOSTER, &DataType::Utf8)?;

    let sites = sites.as_string::<i32>();
    let classes = classes.as_primitive::<Int64Type>();
    let payloads = payloads.as_primitive::<Float64Type>();
    let boosters = boosters.as_string::<i32>();

    let offset = records.len();
    for i in 0..batch.num_rows() {
        let row = offset + i;
        for (array, column) in [
            (sites as &dyn Array, COL_SITE),
            (classes as &dyn Array, COL_CLASS),
            (payloads as &dyn Array, COL_PAYLOAD),
            (boosters as &dyn Array, COL_BOOSTER),
        ] {
            if array.is_null(i) {
                return Err(DataError::NullValue { row, column }.into());
            }
        }
        records.push(LaunchRecord::try_new(
            row,
            sites.value(i),
            classes.value(i),
            payloads.value(i),
            boosters.value(i),
        )?);
    }
    Ok(())
}

/// Fetch a named column and cast it to the type the loader reads.
fn column_as(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .ok_or(DataError::MissingColumn(name))?;
    cast(col, to).with_context(|| format!("column '{name}' cannot be read as {to:?}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::Outcome;

    fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn data_error(err: &anyhow::Error) -> Option<&DataError> {
        err.chain().find_map(|e| e.downcast_ref::<DataError>())
    }

    const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,6,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
3,20,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = temp_with(".csv", CSV);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.max_payload(), 2490.0);
        let first = &table.records()[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.booster_category, "v1.0");
        assert_eq!(table.records()[3].outcome, Outcome::Success);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = temp_with(".csv", "Launch Site,Payload Mass (kg),Booster Version Category\nKSC LC-39A,1.0,FT\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(data_error(&err), Some(&DataError::MissingColumn(COL_CLASS)));
    }

    #[test]
    fn csv_invalid_class_is_reported() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nKSC LC-39A,2,100.0,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::InvalidClass { row: 0, value: "2".into() })
        );
    }

    #[test]
    fn csv_negative_payload_is_reported() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nKSC LC-39A,1,-1.0,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(data_error(&err), Some(DataError::InvalidPayload { row: 0, .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("/nonexistent/spacex_launch_dash.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert_eq!(
            data_error(&err),
            Some(&DataError::UnsupportedExtension("xlsx".into()))
        );
    }

    #[test]
    fn loads_json_records() {
        let file = temp_with(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "class": 1, "Payload Mass (kg)": 500.0,
                 "Booster Version Category": "FT", "Flight Number": 20},
                {"Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 3000,
                 "Booster Version Category": "B4"}
            ]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.min_payload(), 500.0);
        assert_eq!(table.max_payload(), 3000.0);
    }

    #[test]
    fn loads_parquet_with_narrow_integer_class() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int32, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
                Arc::new(Int32Array::from(vec![1, 0])),
                Arc::new(Float64Array::from(vec![4000.0, 9600.0])),
                Arc::new(StringArray::from(vec!["FT", "B4"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].outcome, Outcome::Success);
        assert_eq!(table.records()[1].site, "VAFB SLC-4E");
        assert_eq!(table.max_payload(), 9600.0);
    }

    #[test]
    fn parquet_missing_column_is_reported() {
        let schema = Arc::new(Schema::new(vec![Field::new(COL_SITE, DataType::Utf8, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(StringArray::from(vec!["KSC LC-39A"]))],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert_eq!(data_error(&err), Some(&DataError::MissingColumn(COL_CLASS)));
    }
}
