//! Conversion between a [`Table`] and Arrow record batches laid out the way the
//! Parquet file stores them: three text columns and a list of integers for the
//! birth date.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, GenericListArray, Int64Builder, ListBuilder, OffsetSizeTrait,
    StringBuilder,
};
use arrow::datatypes::{DataType, Field, Int32Type, Int64Type, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use super::StoreError;
use crate::models::{BirthDate, Record, Table, COLUMNS};

const LAST_NAME: &str = COLUMNS[0];
const FIRST_NAME: &str = COLUMNS[1];
const PHONE: &str = COLUMNS[2];
const BIRTH_DATE: &str = COLUMNS[3];

/// Arrow schema written to disk.
pub(super) fn schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(LAST_NAME, DataType::Utf8, false),
        Field::new(FIRST_NAME, DataType::Utf8, false),
        Field::new(PHONE, DataType::Utf8, false),
        Field::new(
            BIRTH_DATE,
            DataType::List(Arc::new(Field::new("item", DataType::Int64, true))),
            false,
        ),
    ]))
}

/// Encode the whole table as one batch.
pub(super) fn encode(table: &Table) -> Result<RecordBatch, StoreError> {
    let mut last_names = StringBuilder::new();
    let mut first_names = StringBuilder::new();
    let mut phones = StringBuilder::new();
    let mut birth_dates = ListBuilder::new(Int64Builder::new());

    for record in table {
        last_names.append_value(&record.last_name);
        first_names.append_value(&record.first_name);
        phones.append_value(&record.phone);

        let (year, month, day) = record.birth_date.as_tuple();
        let parts = birth_dates.values();
        parts.append_value(i64::from(year));
        parts.append_value(i64::from(month));
        parts.append_value(i64::from(day));
        birth_dates.append(true);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(last_names.finish()),
        Arc::new(first_names.finish()),
        Arc::new(phones.finish()),
        Arc::new(birth_dates.finish()),
    ];

    Ok(RecordBatch::try_new(schema(), columns)?)
}

/// Decode one batch into records. Columns are looked up by name so files with
/// extra columns or a different column order still load.
pub(super) fn decode(batch: &RecordBatch) -> Result<Vec<Record>, StoreError> {
    let last_names = text_column(batch, LAST_NAME)?;
    let first_names = text_column(batch, FIRST_NAME)?;
    let phones = text_column(batch, PHONE)?;
    let birth_dates = date_column(batch)?;

    let records = last_names
        .into_iter()
        .zip(first_names)
        .zip(phones)
        .zip(birth_dates)
        .map(|(((last_name, first_name), phone), birth_date)| Record {
            last_name,
            first_name,
            phone,
            birth_date,
        })
        .collect();

    Ok(records)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, StoreError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| StoreError::Schema(format!("missing column `{name}`")))
}

fn text_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>, StoreError> {
    let array = column(batch, name)?;
    let values: Vec<Option<&str>> = match array.data_type() {
        DataType::Utf8 => array.as_string::<i32>().iter().collect(),
        DataType::LargeUtf8 => array.as_string::<i64>().iter().collect(),
        other => {
            return Err(StoreError::Schema(format!(
                "column `{name}` has type {other}, expected text"
            )))
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(str::to_string)
                .ok_or_else(|| StoreError::Schema(format!("column `{name}` is empty at row {row}")))
        })
        .collect()
}

fn date_column(batch: &RecordBatch) -> Result<Vec<BirthDate>, StoreError> {
    let array = column(batch, BIRTH_DATE)?;
    match array.data_type() {
        DataType::List(_) => decode_dates(array.as_list::<i32>()),
        DataType::LargeList(_) => decode_dates(array.as_list::<i64>()),
        other => Err(StoreError::Schema(format!(
            "column `{BIRTH_DATE}` has type {other}, expected a list of integers"
        ))),
    }
}

fn decode_dates<O: OffsetSizeTrait>(
    list: &GenericListArray<O>,
) -> Result<Vec<BirthDate>, StoreError> {
    (0..list.len())
        .map(|row| {
            if list.is_null(row) {
                return Err(StoreError::Schema(format!(
                    "column `{BIRTH_DATE}` is empty at row {row}"
                )));
            }
            let parts = integers(&list.value(row)).ok_or_else(|| {
                StoreError::Schema(format!(
                    "column `{BIRTH_DATE}` holds non-integer values at row {row}"
                ))
            })?;
            birth_date(&parts).ok_or_else(|| {
                StoreError::Schema(format!(
                    "column `{BIRTH_DATE}` holds an invalid date {parts:?} at row {row}"
                ))
            })
        })
        .collect()
}

/// Non-null integer items of a list element, widened to `i64`.
fn integers(values: &ArrayRef) -> Option<Vec<i64>> {
    match values.data_type() {
        DataType::Int64 => values.as_primitive::<Int64Type>().iter().collect(),
        DataType::Int32 => values
            .as_primitive::<Int32Type>()
            .iter()
            .map(|value| value.map(i64::from))
            .collect(),
        _ => None,
    }
}

fn birth_date(parts: &[i64]) -> Option<BirthDate> {
    let [year, month, day] = parts else {
        return None;
    };
    BirthDate::new(
        i32::try_from(*year).ok()?,
        u32::try_from(*month).ok()?,
        u32::try_from(*day).ok()?,
    )
}
