use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use registration_core::{
    draft::RequiredField,
    reference::{BRANCHES, ROLES},
    Branch, BranchId, Form, RegistrationDraft,
};
use tui_input::{backend::crossterm::EventHandler, Input};

form_fields!(
    Field,
    FullName => "Nome Completo *",
    EmployeeCode => "Código A (Ex.: A12345)",
    Email => "Email *",
    Password => "Senha *",
    Branch => "Filial",
    Roles => "Cargos *",
    Submit => "Registrar Usuário",
);

/// Roles are laid out in this many columns
const ROLE_COLUMNS: usize = 2;

/// Rows the form needs, borders included, not counting the error banner
const FORM_HEIGHT: u16 = 22;

/// The form never gets wider than this
const FORM_WIDTH: u16 = 80;

/// Widget state for the registration form: the text inputs (which own cursor
/// positions) and which field has focus. The values themselves live in the
/// `Form`'s draft; the inputs are kept in step with it.
#[derive(Debug)]
pub struct RegistrationForm {
    /// Which field we're editing
    active: Field,

    full_name: Input,
    employee_code: Input,
    email: Input,

    /// Will be masked
    password: Input,

    /// Which role checkbox is highlighted
    role_cursor: usize,
}

impl RegistrationForm {
    /// Handle a key press, applying any changes to `form`'s draft. Returns
    /// `true` if the user asked to submit.
    pub fn handle_event(&mut self, key: KeyEvent, form: &mut Form) -> bool {
        match key.code {
            KeyCode::Tab => self.active = self.active.next(),
            KeyCode::BackTab => self.active = self.active.prev(),
            _ => match self.active {
                Field::FullName => {
                    self.full_name.handle_event(&Event::Key(key));
                    let value = self.full_name.value().to_owned();
                    form.edit(|draft| draft.with_full_name(value));
                }
                Field::EmployeeCode => {
                    self.employee_code.handle_event(&Event::Key(key));
                    let value = self.employee_code.value().to_owned();
                    form.edit(|draft| draft.with_employee_code(value));
                }
                Field::Email => {
                    self.email.handle_event(&Event::Key(key));
                    let value = self.email.value().to_owned();
                    form.edit(|draft| draft.with_email(value));
                }
                Field::Password => {
                    self.password.handle_event(&Event::Key(key));
                    let value = self.password.value().to_owned();
                    form.edit(|draft| draft.with_password(value));
                }
                Field::Branch => {
                    let current = form.draft().branch();
                    let next = match key.code {
                        KeyCode::Right | KeyCode::Char(' ') => Some(cycle_branch(current, true)),
                        KeyCode::Left => Some(cycle_branch(current, false)),
                        KeyCode::Backspace | KeyCode::Delete => Some(None),
                        _ => None,
                    };

                    if let Some(branch) = next {
                        form.edit(|draft| draft.with_branch(branch));
                    }
                }
                Field::Roles => match key.code {
                    KeyCode::Right => self.role_cursor = (self.role_cursor + 1) % ROLES.len(),
                    KeyCode::Left => {
                        self.role_cursor = (self.role_cursor + ROLES.len() - 1) % ROLES.len();
                    }
                    KeyCode::Down => {
                        self.role_cursor = (self.role_cursor + ROLE_COLUMNS) % ROLES.len();
                    }
                    KeyCode::Up => {
                        self.role_cursor =
                            (self.role_cursor + ROLES.len() - ROLE_COLUMNS) % ROLES.len();
                    }
                    KeyCode::Char(' ' | 'x') => {
                        let role = ROLES[self.role_cursor].id;
                        let checked = !form.draft().has_role(role);
                        form.toggle_role(role, checked);
                    }
                    _ => (),
                },
                Field::Submit => return matches!(key.code, KeyCode::Char(' ')),
            },
        }

        false
    }

    /// Move focus to a field the user needs to fill in.
    pub fn focus(&mut self, field: RequiredField) {
        self.active = match field {
            RequiredField::FullName => Field::FullName,
            RequiredField::Email => Field::Email,
        };
    }

    #[cfg(test)]
    pub fn active(&self) -> Field {
        self.active
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, form: &Form, body_area: Rect, frame: &mut Frame<'_>) {
        let error = form.phase().last_error();

        // Grow the banner to fit the whole message, as far as the screen
        // allows. -2 for the form's border, -2 for the banner's.
        let error_height = error.map_or(0, |message| {
            let text_width = body_area.width.min(FORM_WIDTH).saturating_sub(2 + 2);
            let lines = u16::try_from(wrapped_lines(message, text_width)).unwrap_or(u16::MAX);
            let room = body_area.height.saturating_sub(FORM_HEIGHT).max(3);

            lines.saturating_add(2).clamp(3, room)
        });

        let popup_vert =
            Layout::vertical([Constraint::Length(FORM_HEIGHT + error_height)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Max(FORM_WIDTH)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(" Registro de Usuário ")
            .title_alignment(Alignment::Center)
            .border_style(Style::new().fg(Color::Cyan));
        let inner = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let [description_area, error_area, first_row, second_row, branch_area, roles_area, submit_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(error_height),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2 + ROLES.len().div_ceil(ROLE_COLUMNS) as u16),
                Constraint::Length(3),
            ])
            .areas(inner);

        frame.render_widget(
            Paragraph::new("Preencha os dados para registrar um novo usuário no sistema")
                .alignment(Alignment::Center)
                .dark_gray(),
            description_area,
        );

        if let Some(message) = error {
            frame.render_widget(
                Paragraph::new(message)
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Erro")
                            .border_style(Style::new().fg(Color::Red)),
                    )
                    .red(),
                error_area,
            );
        }

        let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]);

        let [name_area, code_area] = halves.areas(first_row);
        self.render_input(frame, name_area, Field::FullName, &self.full_name, None);
        self.render_input(frame, code_area, Field::EmployeeCode, &self.employee_code, None);

        let [email_area, password_area] = halves.areas(second_row);
        self.render_input(frame, email_area, Field::Email, &self.email, None);
        let masked = "*".repeat(self.password.value().chars().count());
        self.render_input(frame, password_area, Field::Password, &self.password, Some(masked));

        self.render_branch(frame, branch_area, form.draft());
        self.render_roles(frame, roles_area, form.draft());

        let (label, style) = if form.phase().is_submitting() {
            ("Registrando...", Style::new().fg(Color::DarkGray))
        } else {
            (
                Field::Submit.label(),
                Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        };

        frame.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(style)
                .block(self.field_block(Field::Submit, "")),
            submit_area,
        );
    }

    fn field_block(&self, field: Field, title: &'static str) -> Block<'static> {
        let border_style = if self.active == field {
            Style::new().fg(Color::Yellow)
        } else {
            Style::new().fg(Color::Blue)
        };

        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style)
    }

    #[expect(clippy::cast_possible_truncation)]
    fn render_input(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        field: Field,
        input: &Input,
        display: Option<String>,
    ) {
        let width = area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor
        let scroll = input.visual_scroll(width as usize);

        let text = display.unwrap_or_else(|| input.value().to_owned());

        frame.render_widget(
            Paragraph::new(text)
                .scroll((0, scroll as u16))
                .block(self.field_block(field, field.label())),
            area,
        );

        if self.active == field {
            frame.set_cursor_position((
                area.x
                    + (input.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                    + 1, // just past the border
                area.y + 1, // +1 row for the border/title
            ));
        }
    }

    fn render_branch(&self, frame: &mut Frame<'_>, area: Rect, draft: &RegistrationDraft) {
        let line = match draft.branch() {
            Some(branch) => Line::from(vec![
                Span::raw("◀ "),
                Span::raw(Branch::name_of(branch)).bold(),
                Span::raw(" ▶"),
            ]),
            None => Line::from("Selecione uma filial (opcional)").dark_gray(),
        };

        frame.render_widget(
            Paragraph::new(line).block(self.field_block(Field::Branch, Field::Branch.label())),
            area,
        );
    }

    #[expect(clippy::cast_possible_truncation)]
    fn render_roles(&self, frame: &mut Frame<'_>, area: Rect, draft: &RegistrationDraft) {
        let block = self.field_block(Field::Roles, Field::Roles.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical(vec![Constraint::Length(1); ROLES.len().div_ceil(ROLE_COLUMNS)])
            .split(inner);

        for (row_idx, row_area) in rows.iter().enumerate() {
            let columns =
                Layout::horizontal(vec![Constraint::Ratio(1, ROLE_COLUMNS as u32); ROLE_COLUMNS])
                    .split(*row_area);

            for (col_idx, cell_area) in columns.iter().enumerate() {
                let idx = row_idx * ROLE_COLUMNS + col_idx;
                let Some(role) = ROLES.get(idx) else { continue };

                let mark = if draft.has_role(role.id) { "[x]" } else { "[ ]" };
                let mut style = Style::new();
                if self.active == Field::Roles && self.role_cursor == idx {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                frame.render_widget(
                    Paragraph::new(format!("{mark} {}", role.name)).style(style),
                    *cell_area,
                );
            }
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            active: Field::FullName,
            full_name: Input::default(),
            employee_code: Input::default(),
            email: Input::default(),
            password: Input::default(),
            role_cursor: 0,
        }
    }
}

/// Step to the next (or previous) branch, passing through "no branch"
/// between the last and the first.
fn cycle_branch(current: Option<BranchId>, forward: bool) -> Option<BranchId> {
    let position = current.and_then(|id| BRANCHES.iter().position(|branch| branch.id == id));

    let next = match (position, forward) {
        (None, true) => Some(0),
        (None, false) => Some(BRANCHES.len() - 1),
        (Some(idx), true) if idx + 1 < BRANCHES.len() => Some(idx + 1),
        (Some(idx), false) if idx > 0 => Some(idx - 1),
        (Some(_), _) => None,
    };

    next.map(|idx| BRANCHES[idx].id)
}

/// How many rows `text` takes when word-wrapped to `width` columns with
/// surrounding whitespace trimmed. Words longer than a row are split.
fn wrapped_lines(text: &str, width: u16) -> usize {
    let width = usize::from(width.max(1));
    let mut lines = 0;

    for paragraph in text.lines() {
        lines += 1;
        let mut current = 0;

        for word in paragraph.split_whitespace() {
            let mut len = word.chars().count();
            let needed = if current == 0 { len } else { current + 1 + len };

            if needed <= width {
                current = needed;
                continue;
            }

            if current > 0 {
                lines += 1;
            }

            while len > width {
                lines += 1;
                len -= width;
            }
            current = len;
        }
    }

    lines.max(1)
}
