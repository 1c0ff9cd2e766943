use crate::models::Record;

/// Row cursor for a table of `len` rows.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) selected: usize,
}

impl Selection {
    pub(crate) fn move_by(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Pull the cursor back inside the table after rows disappear.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// Records matching a birth-month search, shown in place of the full list.
pub(crate) struct MonthResults {
    pub(crate) month: u32,
    pub(crate) records: Vec<Record>,
    pub(crate) selection: Selection,
}

impl MonthResults {
    pub(crate) fn new(month: u32, records: Vec<Record>) -> Self {
        Self {
            month,
            records,
            selection: Selection::default(),
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selection.move_by(offset, self.records.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_to_table() {
        let mut selection = Selection::default();
        selection.move_by(-3, 4);
        assert_eq!(selection.selected, 0);
        selection.move_by(10, 4);
        assert_eq!(selection.selected, 3);
        selection.ensure_in_bounds(2);
        assert_eq!(selection.selected, 1);
        selection.move_by(1, 0);
        assert_eq!(selection.selected, 0);
    }
}
