//! Query and mutation operations over a [`Table`]. Each function takes the
//! current table by reference and hands back either the next table or a query
//! result; none of them touch the disk. Persistence is layered on top by
//! [`crate::store::RecordStore`].

use log::{debug, info};
use thiserror::Error;

use crate::models::{BirthDate, Record, Table};

/// Input problems detected before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field")]
    MissingField,
    #[error("bad date")]
    BadDate,
    #[error("month out of range")]
    MonthOutOfRange(u32),
}

/// Result of a delete: the table that remains plus how many rows went away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub table: Table,
    pub removed: usize,
}

impl Deletion {
    pub fn found(&self) -> bool {
        self.removed > 0
    }
}

/// Parse `YYYY-MM-DD` into a birth date. The year must be exactly four digits;
/// month and day accept one or two digits and must form a real calendar day.
pub fn parse_birth_date(text: &str) -> Result<BirthDate, ValidationError> {
    let mut parts = text.trim().split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ValidationError::BadDate);
    };

    if year.len() != 4 || !is_digits(year) {
        return Err(ValidationError::BadDate);
    }
    if !(1..=2).contains(&month.len()) || !is_digits(month) {
        return Err(ValidationError::BadDate);
    }
    if !(1..=2).contains(&day.len()) || !is_digits(day) {
        return Err(ValidationError::BadDate);
    }

    let year = year.parse().map_err(|_| ValidationError::BadDate)?;
    let month = month.parse().map_err(|_| ValidationError::BadDate)?;
    let day = day.parse().map_err(|_| ValidationError::BadDate)?;

    BirthDate::new(year, month, day).ok_or(ValidationError::BadDate)
}

fn is_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

/// Validate the four raw inputs and build a record from their trimmed values.
pub fn build_record(
    last_name: &str,
    first_name: &str,
    phone: &str,
    birth_date: &str,
) -> Result<Record, ValidationError> {
    let last_name = last_name.trim();
    let first_name = first_name.trim();
    let phone = phone.trim();
    let birth_date = birth_date.trim();

    if last_name.is_empty() || first_name.is_empty() || phone.is_empty() || birth_date.is_empty()
    {
        return Err(ValidationError::MissingField);
    }

    Ok(Record {
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        phone: phone.to_string(),
        birth_date: parse_birth_date(birth_date)?,
    })
}

/// Append a new record and re-sort by last name. The sort is stable, so rows
/// sharing a last name keep their insertion order.
pub fn add_record(
    table: &Table,
    last_name: &str,
    first_name: &str,
    phone: &str,
    birth_date: &str,
) -> Result<Table, ValidationError> {
    let record = build_record(last_name, first_name, phone, birth_date)?;

    let mut records = table.records().to_vec();
    records.push(record);
    records.sort_by(|a, b| a.last_name.cmp(&b.last_name));

    info!(
        "event=record_add module=ops status=ok rows={}",
        records.len()
    );
    Ok(Table::from_records(records))
}

/// Remove every record whose last name equals `last_name` exactly
/// (case-sensitive, whole string).
pub fn delete_by_last_name(table: &Table, last_name: &str) -> Deletion {
    let (removed, kept): (Vec<&Record>, Vec<&Record>) = table
        .iter()
        .partition(|record| record.last_name == last_name);

    info!(
        "event=record_delete module=ops status={} removed={}",
        if removed.is_empty() { "not_found" } else { "ok" },
        removed.len()
    );

    Deletion {
        removed: removed.len(),
        table: Table::from_records(kept.into_iter().cloned().collect()),
    }
}

/// Records born in `month`, in the table's current order. Read-only.
pub fn filter_by_month(table: &Table, month: u32) -> Result<Vec<Record>, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange(month));
    }

    let matches: Vec<Record> = table
        .iter()
        .filter(|record| record.birth_date.month == month)
        .cloned()
        .collect();

    debug!(
        "event=month_filter module=ops status=ok month={month} matches={}",
        matches.len()
    );
    Ok(matches)
}
