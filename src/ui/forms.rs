use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::ops::ValidationError;

/// Internal representation of the "add record" form fields.
#[derive(Default, Clone)]
pub(crate) struct RecordForm {
    pub(crate) last_name: String,
    pub(crate) first_name: String,
    pub(crate) phone: String,
    pub(crate) birth_date: String,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
}

/// Fields of the record form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum RecordField {
    #[default]
    LastName,
    FirstName,
    Phone,
    BirthDate,
}

impl RecordField {
    pub(crate) const ALL: [RecordField; 4] = [
        RecordField::LastName,
        RecordField::FirstName,
        RecordField::Phone,
        RecordField::BirthDate,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            RecordField::LastName => "Last name",
            RecordField::FirstName => "First name",
            RecordField::Phone => "Phone",
            RecordField::BirthDate => "Birth date (YYYY-MM-DD)",
        }
    }

    fn index(self) -> usize {
        match self {
            RecordField::LastName => 0,
            RecordField::FirstName => 1,
            RecordField::Phone => 2,
            RecordField::BirthDate => 3,
        }
    }
}

impl RecordForm {
    /// Move focus forward, wrapping after the last field.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % RecordField::ALL.len();
        self.active = RecordField::ALL[next];
    }

    /// Move focus backward, wrapping before the first field.
    pub(crate) fn previous_field(&mut self) {
        let len = RecordField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = RecordField::ALL[previous];
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    pub(crate) fn value(&self, field: RecordField) -> &str {
        match field {
            RecordField::LastName => &self.last_name,
            RecordField::FirstName => &self.first_name,
            RecordField::Phone => &self.phone,
            RecordField::BirthDate => &self.birth_date,
        }
    }

    fn value_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::LastName => &mut self.last_name,
            RecordField::FirstName => &mut self.first_name,
            RecordField::Phone => &mut self.phone,
            RecordField::BirthDate => &mut self.birth_date,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: RecordField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Column where the cursor sits for the active field.
    pub(crate) fn cursor_offset(&self) -> usize {
        self.active.label().chars().count() + 2 + self.value(self.active).chars().count()
    }

    /// Row of the active field inside the form.
    pub(crate) fn cursor_row(&self) -> usize {
        self.active.index()
    }
}

/// Single-line prompt used for the month search and the delete question.
#[derive(Clone)]
pub(crate) struct Prompt {
    pub(crate) label: &'static str,
    pub(crate) value: String,
    pub(crate) digits_only: bool,
    pub(crate) max_len: Option<usize>,
    pub(crate) error: Option<String>,
}

impl Prompt {
    /// Prompt for a birth month, accepting at most two digits.
    pub(crate) fn month() -> Self {
        Self {
            label: "Month (1-12)",
            value: String::new(),
            digits_only: true,
            max_len: Some(2),
            error: None,
        }
    }

    /// Prompt for the last name whose records should be deleted.
    pub(crate) fn last_name() -> Self {
        Self {
            label: "Last name to delete",
            value: String::new(),
            digits_only: false,
            max_len: None,
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || (self.digits_only && !ch.is_ascii_digit()) {
            return false;
        }
        if self
            .max_len
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{}: ", self.label)),
            Span::styled(self.value.clone(), Style::default().fg(Color::Yellow)),
        ])
    }

    pub(crate) fn cursor_offset(&self) -> usize {
        self.label.chars().count() + 2 + self.value.chars().count()
    }
}

/// Human-readable text for a validation failure.
pub(crate) fn describe_validation(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingField => "Fill in all fields.".to_string(),
        ValidationError::BadDate => "Birth date must be in YYYY-MM-DD format.".to_string(),
        ValidationError::MonthOutOfRange(_) => "Enter a month between 1 and 12.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = RecordForm::default();
        assert_eq!(form.active, RecordField::LastName);
        form.previous_field();
        assert_eq!(form.active, RecordField::BirthDate);
        form.next_field();
        assert_eq!(form.active, RecordField::LastName);
        form.next_field();
        assert_eq!(form.active, RecordField::FirstName);
    }

    #[test]
    fn typing_targets_the_active_field() {
        let mut form = RecordForm::default();
        for ch in "Smith".chars() {
            assert!(form.push_char(ch));
        }
        form.next_field();
        form.push_char('J');
        assert!(!form.push_char('\n'));
        form.backspace();
        form.backspace();

        assert_eq!(form.last_name, "Smith");
        assert_eq!(form.first_name, "");
        assert_eq!(form.cursor_offset(), "First name: ".len());
        assert_eq!(form.cursor_row(), 1);
    }

    #[test]
    fn month_prompt_accepts_two_digits_only() {
        let mut prompt = Prompt::month();
        assert!(!prompt.push_char('x'));
        assert!(prompt.push_char('1'));
        assert!(prompt.push_char('2'));
        assert!(!prompt.push_char('3'));
        assert_eq!(prompt.value, "12");
    }

    #[test]
    fn last_name_prompt_takes_any_text() {
        let mut prompt = Prompt::last_name();
        for ch in "Иванов".chars() {
            assert!(prompt.push_char(ch));
        }
        assert_eq!(prompt.value, "Иванов");
        assert_eq!(
            prompt.cursor_offset(),
            "Last name to delete: ".len() + "Иванов".chars().count()
        );
    }
}
