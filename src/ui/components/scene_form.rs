//! Scene entry form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::dialog::{DialogFrame, InstructionBar};
use super::text_input::TextInputState;
use crate::data::SceneDraft;

const FIELD_LABELS: [&str; 11] = [
    "Number",
    "Heading",
    "Date",
    "Time",
    "Type",
    "Location",
    "Pages",
    "Duration",
    "Status",
    "Cast",
    "Equipment",
];

/// Fields rendered as a cycling choice instead of free text
const KIND_FIELD: usize = 4;
const STATUS_FIELD: usize = 8;

const KINDS: [&str; 2] = ["INT", "EXT"];
const STATUSES: [&str; 4] = ["Confirmed", "Pending", "Standby", "Canceled"];

const PLACEHOLDERS: [&str; 11] = [
    "12A",
    "INT. OFFICE - DAY",
    "2026-03-14",
    "08:00",
    "",
    "Stage 4",
    "2 3/8",
    "3h",
    "",
    "J. Doe, A. Smith",
    "Steadicam, 2x HMI",
];

/// What a handled keystroke produced
#[derive(Debug)]
pub enum SceneFormOutcome {
    /// User submitted the form
    Submit(SceneDraft),
    /// User dismissed the form
    Cancel,
}

/// State for the scene entry form
pub struct SceneFormState {
    pub visible: bool,
    focus: usize,
    inputs: Vec<TextInputState>,
    kind_idx: usize,
    status_idx: usize,
}

impl Default for SceneFormState {
    fn default() -> Self {
        Self {
            visible: false,
            focus: 0,
            inputs: (0..FIELD_LABELS.len()).map(|_| TextInputState::new()).collect(),
            kind_idx: 0,
            status_idx: 0,
        }
    }
}

impl SceneFormState {
    /// Open the form with empty fields
    pub fn open(&mut self) {
        *self = Self::default();
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELD_LABELS.len();
    }

    fn prev_field(&mut self) {
        self.focus = (self.focus + FIELD_LABELS.len() - 1) % FIELD_LABELS.len();
    }

    fn is_choice_field(&self) -> bool {
        self.focus == KIND_FIELD || self.focus == STATUS_FIELD
    }

    fn cycle_choice(&mut self, forward: bool) {
        let (idx, len) = match self.focus {
            KIND_FIELD => (&mut self.kind_idx, KINDS.len()),
            STATUS_FIELD => (&mut self.status_idx, STATUSES.len()),
            _ => return,
        };
        *idx = if forward {
            (*idx + 1) % len
        } else {
            (*idx + len - 1) % len
        };
    }

    /// Assemble the draft from the current field values
    fn to_draft(&self) -> SceneDraft {
        SceneDraft {
            number: self.inputs[0].value(),
            heading: self.inputs[1].value(),
            date: self.inputs[2].value(),
            time: self.inputs[3].value(),
            kind: KINDS[self.kind_idx].to_string(),
            location: self.inputs[5].value(),
            pages: self.inputs[6].value(),
            duration: self.inputs[7].value(),
            status: STATUSES[self.status_idx].to_string(),
            cast: self.inputs[9].value(),
            equipment: self.inputs[10].value(),
        }
    }

    /// Route a keystroke. Returns an outcome when the form is done.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SceneFormOutcome> {
        match key.code {
            KeyCode::Esc => {
                self.close();
                return Some(SceneFormOutcome::Cancel);
            }
            KeyCode::Enter => {
                let draft = self.to_draft();
                self.close();
                return Some(SceneFormOutcome::Submit(draft));
            }
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Left if self.is_choice_field() => self.cycle_choice(false),
            KeyCode::Right if self.is_choice_field() => self.cycle_choice(true),
            KeyCode::Char(' ') if self.is_choice_field() => self.cycle_choice(true),
            KeyCode::Left => self.inputs[self.focus].move_left(),
            KeyCode::Right => self.inputs[self.focus].move_right(),
            KeyCode::Home => self.inputs[self.focus].move_start(),
            KeyCode::End => self.inputs[self.focus].move_end(),
            KeyCode::Backspace => self.inputs[self.focus].delete_char(),
            KeyCode::Delete => self.inputs[self.focus].delete_forward(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.inputs[self.focus].delete_to_start()
            }
            KeyCode::Char(c) if !self.is_choice_field() => self.inputs[self.focus].insert_char(c),
            _ => {}
        }
        None
    }
}

/// Scene entry form widget
pub struct SceneForm<'a> {
    state: &'a SceneFormState,
}

impl<'a> SceneForm<'a> {
    pub fn new(state: &'a SceneFormState) -> Self {
        Self { state }
    }
}

impl Widget for SceneForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        let height = FIELD_LABELS.len() as u16 + 4;
        let frame = DialogFrame::new("New Scene", 62, height);
        let inner = frame.render(area, buf);

        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height.saturating_sub(1) {
                break;
            }

            let focused = i == self.state.focus;
            let label_style = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Paragraph::new(Line::from(Span::styled(
                format!("{:>10}: ", label),
                label_style,
            )))
            .render(
                Rect {
                    x: inner.x,
                    y,
                    width: 13.min(inner.width),
                    height: 1,
                },
                buf,
            );

            let value_area = Rect {
                x: inner.x + 13,
                y,
                width: inner.width.saturating_sub(13),
                height: 1,
            };

            match i {
                KIND_FIELD => render_choice(KINDS[self.state.kind_idx], focused, value_area, buf),
                STATUS_FIELD => {
                    render_choice(STATUSES[self.state.status_idx], focused, value_area, buf)
                }
                _ => self.state.inputs[i].render(value_area, buf, PLACEHOLDERS[i], focused),
            }
        }

        let instructions = InstructionBar::new(vec![
            ("Tab", "Next"),
            ("←/→", "Cycle"),
            ("Enter", "Add"),
            ("Esc", "Cancel"),
        ]);
        instructions.render(
            Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            },
            buf,
        );
    }
}

fn render_choice(value: &str, focused: bool, area: Rect, buf: &mut Buffer) {
    let style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    Paragraph::new(Line::from(Span::styled(format!("◂ {} ▸", value), style))).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut form = SceneFormState::default();
        form.open();
        for c in "12A".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        form.handle_key(key(KeyCode::Tab));
        for c in "INT. OFFICE".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }

        match form.handle_key(key(KeyCode::Enter)) {
            Some(SceneFormOutcome::Submit(draft)) => {
                assert_eq!(draft.number, "12A");
                assert_eq!(draft.heading, "INT. OFFICE");
                assert_eq!(draft.kind, "INT");
                assert_eq!(draft.status, "Confirmed");
            }
            other => panic!("expected submit, got {:?}", other),
        }
        assert!(!form.visible);
    }

    #[test]
    fn choice_fields_cycle_instead_of_typing() {
        let mut form = SceneFormState::default();
        form.open();
        // Move to the Type field
        for _ in 0..KIND_FIELD {
            form.handle_key(key(KeyCode::Tab));
        }
        form.handle_key(key(KeyCode::Right));
        // Typing on a choice field is ignored
        form.handle_key(key(KeyCode::Char('x')));

        // Move to Status and cycle backwards (wraps to the last label)
        for _ in KIND_FIELD..STATUS_FIELD {
            form.handle_key(key(KeyCode::Tab));
        }
        form.handle_key(key(KeyCode::Left));

        match form.handle_key(key(KeyCode::Enter)) {
            Some(SceneFormOutcome::Submit(draft)) => {
                assert_eq!(draft.kind, "EXT");
                assert_eq!(draft.status, "Canceled");
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn escape_cancels_without_a_draft() {
        let mut form = SceneFormState::default();
        form.open();
        form.handle_key(key(KeyCode::Char('x')));
        assert!(matches!(
            form.handle_key(key(KeyCode::Esc)),
            Some(SceneFormOutcome::Cancel)
        ));
        assert!(!form.visible);
    }
}
