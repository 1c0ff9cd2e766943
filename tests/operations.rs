use people_manager::{
    add_record, delete_by_last_name, filter_by_month, BirthDate, Record, Table, ValidationError,
};

fn record(last: &str, first: &str, date: (i32, u32, u32)) -> Record {
    Record {
        last_name: last.to_string(),
        first_name: first.to_string(),
        phone: "555-0100".to_string(),
        birth_date: BirthDate::new(date.0, date.1, date.2).unwrap(),
    }
}

fn last_names(table: &Table) -> Vec<&str> {
    table.iter().map(|r| r.last_name.as_str()).collect()
}

#[test]
fn add_sorts_by_last_name_and_stores_date_triple() {
    let table = Table::new();
    let table = add_record(&table, "Smith", "John", "1", "1985-07-04").unwrap();
    let table = add_record(&table, "Adams", "Eve", "2", "1990-01-15").unwrap();
    let table = add_record(&table, "Jones", "Ann", "3", "2001-12-31").unwrap();

    assert_eq!(last_names(&table), ["Adams", "Jones", "Smith"]);
    assert!(table.is_sorted_by_last_name());

    let adams = &table.records()[0];
    assert_eq!(adams.birth_date.as_tuple(), (1990, 1, 15));
}

#[test]
fn add_keeps_insertion_order_among_equal_last_names() {
    let mut table = Table::new();
    for first in ["First", "Second", "Third"] {
        table = add_record(&table, "Smith", first, "1", "1980-05-05").unwrap();
        table = add_record(&table, "Brown", first, "1", "1980-05-05").unwrap();
    }

    let smiths: Vec<&str> = table
        .iter()
        .filter(|r| r.last_name == "Smith")
        .map(|r| r.first_name.as_str())
        .collect();
    assert_eq!(smiths, ["First", "Second", "Third"]);
    assert_eq!(
        last_names(&table),
        ["Brown", "Brown", "Brown", "Smith", "Smith", "Smith"]
    );
}

#[test]
fn add_with_empty_field_leaves_table_unchanged() {
    let table = Table::from_records(vec![record("Smith", "John", (1985, 7, 4))]);

    for fields in [
        ["", "John", "1", "1985-07-04"],
        ["Smith", "", "1", "1985-07-04"],
        ["Smith", "John", "  ", "1985-07-04"],
        ["Smith", "John", "1", ""],
    ] {
        let result = add_record(&table, fields[0], fields[1], fields[2], fields[3]);
        assert_eq!(result, Err(ValidationError::MissingField));
    }
    assert_eq!(table.len(), 1);
}

#[test]
fn add_with_invalid_month_is_rejected() {
    let table = Table::new();
    assert_eq!(
        add_record(&table, "Smith", "John", "1", "2023-13-01"),
        Err(ValidationError::BadDate)
    );
    assert!(table.is_empty());
}

#[test]
fn delete_unknown_last_name_is_a_no_op() {
    let table = Table::from_records(vec![
        record("Jones", "Ann", (1990, 1, 1)),
        record("Smith", "John", (1985, 7, 4)),
    ]);

    let deletion = delete_by_last_name(&table, "Nonexistent");
    assert!(!deletion.found());
    assert_eq!(deletion.removed, 0);
    assert_eq!(deletion.table, table);
}

#[test]
fn delete_removes_every_exact_match() {
    let table = Table::from_records(vec![
        record("Jones", "Ann", (1990, 1, 1)),
        record("Smith", "John", (1985, 7, 4)),
        record("Smith", "Jane", (1987, 3, 9)),
    ]);

    let deletion = delete_by_last_name(&table, "Smith");
    assert_eq!(deletion.removed, 2);
    assert_eq!(last_names(&deletion.table), ["Jones"]);
}

#[test]
fn delete_is_case_sensitive_and_not_substring() {
    let table = Table::from_records(vec![
        record("Smith", "John", (1985, 7, 4)),
        record("Smithson", "Jane", (1987, 3, 9)),
    ]);

    assert_eq!(delete_by_last_name(&table, "smith").removed, 0);
    assert_eq!(delete_by_last_name(&table, "Smit").removed, 0);

    let deletion = delete_by_last_name(&table, "Smith");
    assert_eq!(last_names(&deletion.table), ["Smithson"]);
}

#[test]
fn filter_returns_matching_months_in_table_order() {
    let table = Table::from_records(vec![
        record("Adams", "A", (1990, 1, 1)),
        record("Brown", "B", (1991, 5, 2)),
        record("Clark", "C", (1992, 5, 3)),
        record("Davis", "D", (1993, 12, 4)),
    ]);

    let may = filter_by_month(&table, 5).unwrap();
    let names: Vec<&str> = may.iter().map(|r| r.last_name.as_str()).collect();
    assert_eq!(names, ["Brown", "Clark"]);

    assert!(filter_by_month(&table, 6).unwrap().is_empty());
    assert_eq!(table.len(), 4);
}

#[test]
fn filter_rejects_months_outside_calendar() {
    let table = Table::new();
    assert_eq!(
        filter_by_month(&table, 0),
        Err(ValidationError::MonthOutOfRange(0))
    );
    assert_eq!(
        filter_by_month(&table, 13),
        Err(ValidationError::MonthOutOfRange(13))
    );
}
