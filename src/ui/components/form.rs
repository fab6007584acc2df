//! Entry Form Component
//!
//! Form for adding a credential, with an inline password generator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::generator::{self, CharClass, GeneratorOptions, GeneratorResult};
use crate::input::{scroll_offset, Action, LineBuffer};
use crate::store::CredentialEntry;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: LineBuffer,
    pub required: bool,
    pub masked: bool,
}

impl FormField {
    pub fn text(label: &'static str, required: bool) -> Self {
        Self {
            label,
            value: LineBuffer::new(),
            required,
            masked: false,
        }
    }

    pub fn password(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label, true)
        }
    }
}

const WEBSITE: usize = 0;
const USERNAME: usize = 1;
const PASSWORD: usize = 2;

/// New entry form state. Each field keeps its own cursor.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub fields: Vec<FormField>,
    pub active_field: usize,
    pub show_password: bool,
    pub options: GeneratorOptions,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl EntryForm {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            fields: vec![
                FormField::text("Website", true),
                FormField::text("Username", false),
                FormField::password("Password"),
            ],
            active_field: 0,
            show_password: false,
            options,
        }
    }

    pub fn active_field(&self) -> &FormField {
        &self.fields[self.active_field]
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.active_field = (self.active_field + self.fields.len() - 1) % self.fields.len();
    }

    /// Apply a line-editing action to the active field.
    pub fn edit(&mut self, action: &Action) -> bool {
        self.fields[self.active_field].value.apply(action)
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_class(&mut self, class: CharClass) {
        self.options.classes.toggle(class);
    }

    pub fn adjust_length(&mut self, delta: i64) {
        self.options.adjust_length(delta);
    }

    /// Fill the password field from the generator and reveal it.
    pub fn generate_password(&mut self) -> GeneratorResult<()> {
        let password = generator::generate(self.options.length(), self.options.classes)?;
        self.fields[PASSWORD].value.set(&password);
        self.show_password = true;
        Ok(())
    }

    pub fn password(&self) -> &str {
        self.fields[PASSWORD].value.as_str()
    }

    /// The entry as typed. Validation happens in the store.
    pub fn to_entry(&self) -> CredentialEntry {
        CredentialEntry::new(
            self.fields[WEBSITE].value.as_str(),
            self.fields[USERNAME].value.as_str(),
            self.fields[PASSWORD].value.as_str(),
        )
    }
}

fn strength_color(strength: u32) -> Color {
    match strength {
        0..=20 => Color::Red,
        21..=40 => Color::LightRed,
        41..=60 => Color::Yellow,
        61..=80 => Color::LightGreen,
        _ => Color::Green,
    }
}

/// Password strength indicator widget
pub struct PasswordStrength {
    strength: u32,
}

impl PasswordStrength {
    pub fn new(password: &str) -> Self {
        Self {
            strength: generator::password_strength(password),
        }
    }
}

impl Widget for PasswordStrength {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let filled = (self.strength as f32 / 100.0 * area.width as f32) as u16;
        let color = strength_color(self.strength);

        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled {
                Style::default().bg(color)
            } else {
                Style::default().bg(Color::DarkGray)
            };
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_style(style);
            }
        }

        let label = generator::strength_label(self.strength);
        let label_x = area.x + (area.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, area.y, label, Style::default().fg(Color::White));
    }
}

fn options_line(options: &GeneratorOptions) -> Line<'static> {
    let key = Style::default().fg(Color::Magenta);
    let mut spans = vec![
        Span::styled("Length ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{:<4}", options.length()), Style::default().fg(Color::Yellow)),
    ];

    for (i, class) in CharClass::ALL.iter().enumerate() {
        let mark = if options.classes.contains(*class) { "[x]" } else { "[ ]" };
        spans.push(Span::styled(format!(" {}", i + 1), key));
        spans.push(Span::raw(format!("{} {} ", mark, class.label())));
    }
    Line::from(spans)
}

/// Entry form widget
pub struct EntryFormWidget<'a> {
    form: &'a EntryForm,
}

impl<'a> EntryFormWidget<'a> {
    pub fn new(form: &'a EntryForm) -> Self {
        Self { form }
    }
}

impl<'a> Widget for EntryFormWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form_width = 70u16.min(area.width.saturating_sub(4));
        let form_height = 14u16.min(area.height.saturating_sub(2));
        let form_x = area.x + (area.width.saturating_sub(form_width)) / 2;
        let form_y = area.y + (area.height.saturating_sub(form_height)) / 2;
        let form_area = Rect::new(form_x, form_y, form_width, form_height);

        Clear.render(form_area, buf);

        let block = Block::default()
            .title(" New Entry ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(form_area);
        block.render(form_area, buf);
        if inner.height < 2 {
            return;
        }

        let label_width = 12u16;
        let value_x = inner.x + label_width;
        let value_width = inner.width.saturating_sub(label_width + 1);
        let mut y = inner.y;

        for (i, field) in self.form.fields.iter().enumerate() {
            let is_active = i == self.form.active_field;

            let label = if field.required {
                format!("{}*:", field.label)
            } else {
                format!("{}:", field.label)
            };
            let label_style = if is_active {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            buf.set_string(inner.x, y, &label, label_style);

            let bg = if is_active { Color::DarkGray } else { Color::Black };
            for x in value_x..value_x + value_width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(Style::default().bg(bg));
                }
            }

            let line = &field.value;
            let width = value_width as usize;
            let start = if is_active { scroll_offset(line.cursor(), width) } else { 0 };
            let display_value: String = if field.masked && !self.form.show_password {
                "*".repeat(line.char_len().saturating_sub(start).min(width))
            } else {
                line.as_str().chars().skip(start).collect()
            };
            let value_style = if field.masked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            buf.set_stringn(value_x, y, &display_value, width, value_style.bg(bg));

            if is_active && width > 0 {
                let cursor_x = value_x + (line.cursor() - start) as u16;
                if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                    cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                }
            }

            y += 2;
        }

        let bottom = inner.y + inner.height;
        if y < bottom {
            PasswordStrength::new(self.form.password())
                .render(Rect::new(value_x, y, value_width.min(30), 1), buf);
            y += 2;
        }

        if y < bottom {
            buf.set_line(inner.x, y, &options_line(&self.form.options), inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::options::DIGITS;
    use crate::generator::CharClasses;

    fn type_str(form: &mut EntryForm, text: &str) {
        for c in text.chars() {
            form.edit(&Action::InsertChar(c));
        }
    }

    fn render_form(form: &EntryForm) -> Buffer {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        EntryFormWidget::new(form).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = EntryForm::default();
        assert_eq!(form.active_field().label, "Website");

        form.next_field();
        form.next_field();
        assert_eq!(form.active_field().label, "Password");

        form.next_field();
        assert_eq!(form.active_field().label, "Website");

        form.prev_field();
        assert_eq!(form.active_field().label, "Password");
    }

    #[test]
    fn test_to_entry() {
        let mut form = EntryForm::default();
        type_str(&mut form, "example.com");
        form.next_field();
        type_str(&mut form, "alice");
        form.next_field();
        type_str(&mut form, "s3cret");

        assert_eq!(form.to_entry(), CredentialEntry::new("example.com", "alice", "s3cret"));
    }

    #[test]
    fn test_editing_keeps_whitespace() {
        let mut form = EntryForm::default();
        type_str(&mut form, " a ");
        form.edit(&Action::CursorHome);
        form.edit(&Action::DeleteCharForward);

        assert_eq!(form.to_entry().website, "a ");
    }

    #[test]
    fn test_fields_keep_their_own_cursor() {
        let mut form = EntryForm::default();
        type_str(&mut form, "example.com");
        form.edit(&Action::CursorHome);
        form.next_field();
        type_str(&mut form, "alice");
        form.prev_field();

        type_str(&mut form, "www.");
        assert_eq!(form.to_entry().website, "www.example.com");
        assert!(!form.edit(&Action::NextField));
    }

    #[test]
    fn test_generate_fills_password() {
        let options = GeneratorOptions::new(12, CharClasses::only(CharClass::Digit));
        let mut form = EntryForm::new(options);

        form.generate_password().unwrap();

        assert_eq!(form.password().len(), 12);
        assert!(form.password().chars().all(|c| DIGITS.contains(c)));
        assert!(form.show_password);
    }

    #[test]
    fn test_generator_controls() {
        let mut form = EntryForm::default();
        let length = form.options.length();

        form.adjust_length(-1);
        form.toggle_class(CharClass::Symbol);

        assert_eq!(form.options.length(), length - 1);
        assert!(!form.options.classes.contains(CharClass::Symbol));

        form.generate_password().unwrap();
        assert_eq!(form.password().chars().count(), length - 1);
    }

    #[test]
    fn test_render_masks_password() {
        let mut form = EntryForm::default();
        form.next_field();
        form.next_field();
        type_str(&mut form, "hunter2");

        let text: String = render_form(&form).content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Website*:"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_long_password_scrolls_to_cursor() {
        let mut form = EntryForm::new(GeneratorOptions::new(128, CharClasses::only(CharClass::Digit)));
        form.prev_field();
        form.generate_password().unwrap();
        assert_eq!(form.active_field().value.cursor(), 128);

        let buf = render_form(&form);
        let area = *buf.area();
        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();

        let tail = &form.password()[118..];
        assert!(rows.iter().any(|row| row.contains(tail)));

        let cursor_cells = buf.content().iter().filter(|c| c.bg == Color::White).count();
        assert_eq!(cursor_cells, 1);
    }
}
