use std::fs;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Builder, LargeListBuilder, LargeStringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use people_manager::{load_table, save_table, BirthDate, Record, StoreError, Table, COLUMNS};

fn record(last: &str, first: &str, phone: &str, date: (i32, u32, u32)) -> Record {
    Record {
        last_name: last.to_string(),
        first_name: first.to_string(),
        phone: phone.to_string(),
        birth_date: BirthDate::new(date.0, date.1, date.2).unwrap(),
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");

    let table = Table::from_records(vec![
        record("Иванов", "Иван", "123", (1990, 1, 1)),
        record("Smith", "John", "+1 555 0100", (1985, 7, 4)),
    ]);

    save_table(&table, &path).unwrap();
    let (loaded, err) = load_table(&path);

    assert!(err.is_none());
    assert_eq!(loaded, table);
    assert_eq!(loaded.records()[0].birth_date.as_tuple(), (1990, 1, 1));
}

#[test]
fn empty_table_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");

    save_table(&Table::new(), &path).unwrap();
    assert!(path.exists());

    let (loaded, err) = load_table(&path);
    assert!(err.is_none());
    assert!(loaded.is_empty());
    assert_eq!(loaded.columns(), &COLUMNS);
}

#[test]
fn save_creates_missing_directories_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Desktop").join("data").join("people.parquet");

    save_table(
        &Table::from_records(vec![record("Smith", "John", "1", (1985, 7, 4))]),
        &path,
    )
    .unwrap();
    save_table(
        &Table::from_records(vec![record("Jones", "Ann", "2", (1990, 2, 3))]),
        &path,
    )
    .unwrap();

    let (loaded, err) = load_table(&path);
    assert!(err.is_none());
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.records()[0].last_name, "Jones");

    // Only the data file is left behind; the staging file was renamed.
    let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn loading_nonexistent_path_gives_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("people.parquet");

    let (table, err) = load_table(&path);

    assert!(err.is_none());
    assert!(table.is_empty());
    assert_eq!(table.columns(), &COLUMNS);
    assert!(path.parent().unwrap().is_dir());
}

#[test]
fn corrupt_file_reports_error_and_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");
    fs::write(&path, b"definitely not parquet").unwrap();

    let (table, err) = load_table(&path);

    assert!(table.is_empty());
    assert!(matches!(err, Some(StoreError::Parquet(_))));
}

#[test]
fn file_without_expected_columns_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");

    let schema = Arc::new(Schema::new(vec![Field::new("name", DataType::LargeUtf8, false)]));
    let mut names = LargeStringBuilder::new();
    names.append_value("Smith");
    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(names.finish()) as ArrayRef])
        .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let (table, err) = load_table(&path);

    assert!(table.is_empty());
    assert!(matches!(err, Some(StoreError::Schema(_))));
}

#[test]
fn loads_files_using_wide_offsets_and_narrow_integers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");

    // Columns in a different order, large string offsets, 32-bit date parts.
    let date_type = DataType::LargeList(Arc::new(Field::new("item", DataType::Int32, true)));
    let schema = Arc::new(Schema::new(vec![
        Field::new(COLUMNS[3], date_type, true),
        Field::new(COLUMNS[2], DataType::LargeUtf8, true),
        Field::new(COLUMNS[1], DataType::LargeUtf8, true),
        Field::new(COLUMNS[0], DataType::LargeUtf8, true),
    ]));

    let mut dates = LargeListBuilder::new(Int32Builder::new());
    dates.values().append_slice(&[1990, 1, 1]);
    dates.append(true);

    let text = |value: &str| -> ArrayRef {
        let mut builder = LargeStringBuilder::new();
        builder.append_value(value);
        Arc::new(builder.finish())
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(dates.finish()) as ArrayRef,
            text("123"),
            text("Иван"),
            text("Иванов"),
        ],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let (table, err) = load_table(&path);

    assert!(err.is_none(), "{err:?}");
    assert_eq!(
        table.into_records(),
        vec![record("Иванов", "Иван", "123", (1990, 1, 1))]
    );
}
