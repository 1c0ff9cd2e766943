//! Domain models for the people list. A `Table` is the complete dataset held in
//! memory; every mutation produces the next `Table` value so the persistence
//! layer only ever sees whole snapshots.

use std::fmt;

/// Column labels of the persisted file, in order. The labels are part of the
/// on-disk format and stay untranslated so older files keep loading.
pub const COLUMNS: [&str; 4] = ["Фамилия", "Имя", "Телефон", "Дата рождения"];

/// Column headings shown in the terminal UI, aligned with [`COLUMNS`].
pub const COLUMN_TITLES: [&str; 4] = ["Last name", "First name", "Phone", "Birth date"];

/// Earliest year a birth date may carry.
pub const MIN_YEAR: i32 = 1;

/// Calendar date stored as an ordered `(year, month, day)` triple rather than a
/// formatted string. Month is always within `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate {
    /// Calendar year, never below 1.
    pub year: i32,
    /// Month number in `1..=12`.
    pub month: u32,
    /// Day of the month, valid for `year` and `month`.
    pub day: u32,
}

impl BirthDate {
    /// Build a date from its parts, rejecting anything that is not a real
    /// calendar day (year 0, month 13, February 30th and so on).
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if year < MIN_YEAR {
            return None;
        }
        chrono::NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self { year, month, day })
    }

    /// The triple in storage order.
    pub fn as_tuple(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

impl fmt::Display for BirthDate {
    /// Rendered the way the list column has always shown it: `[1990, 1, 1]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.year, self.month, self.day)
    }
}

/// One person entry. All four fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Family name; the table is kept sorted by this field.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Phone number as typed. No format is enforced.
    pub phone: String,
    /// Birth date as a `(year, month, day)` triple.
    pub birth_date: BirthDate,
}

impl Record {
    /// Cell texts in column order, ready for the table widget.
    pub fn cells(&self) -> [String; 4] {
        [
            self.last_name.clone(),
            self.first_name.clone(),
            self.phone.clone(),
            self.birth_date.to_string(),
        ]
    }
}

/// Ordered sequence of records. The column set is fixed (see [`COLUMNS`]) and
/// never inferred from the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// An empty table with the fixed schema.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> &'static [&'static str; 4] {
        &COLUMNS
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Whether rows are in ascending last-name order.
    pub fn is_sorted_by_last_name(&self) -> bool {
        self.records
            .windows(2)
            .all(|pair| pair[0].last_name <= pair[1].last_name)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
