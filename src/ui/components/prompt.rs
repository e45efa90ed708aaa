//! One-line input prompt dialog (import path, project rename)

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use super::dialog::{DialogFrame, InstructionBar};
use super::text_input::TextInputState;

/// What a handled keystroke produced
#[derive(Debug)]
pub enum PromptOutcome {
    /// User accepted the entered value
    Accept(String),
    /// User dismissed the prompt
    Cancel,
}

/// State for a one-line prompt dialog
#[derive(Default)]
pub struct PromptState {
    pub visible: bool,
    title: String,
    placeholder: String,
    input: TextInputState,
}

impl PromptState {
    /// Open the prompt with a title, placeholder, and initial value
    pub fn open(
        &mut self,
        title: impl Into<String>,
        placeholder: impl Into<String>,
        initial: &str,
    ) {
        self.title = title.into();
        self.placeholder = placeholder.into();
        self.input = TextInputState::with_value(initial);
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Route a keystroke. Returns an outcome when the prompt is done.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        match key.code {
            KeyCode::Esc => {
                self.close();
                return Some(PromptOutcome::Cancel);
            }
            KeyCode::Enter => {
                let value = self.input.value();
                self.close();
                return Some(PromptOutcome::Accept(value));
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_start(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Backspace => self.input.delete_char(),
            KeyCode::Delete => self.input.delete_forward(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.delete_to_start()
            }
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
        None
    }
}

/// Prompt dialog widget
pub struct Prompt<'a> {
    state: &'a PromptState,
}

impl<'a> Prompt<'a> {
    pub fn new(state: &'a PromptState) -> Self {
        Self { state }
    }
}

impl Widget for Prompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        let frame = DialogFrame::new(&self.state.title, 56, 5).border_color(Color::Cyan);
        let inner = frame.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let input_area = Rect {
            x: inner.x + 1,
            y: inner.y,
            width: inner.width.saturating_sub(2),
            height: 1,
        };
        self.state
            .input
            .render(input_area, buf, &self.state.placeholder, true);

        let instructions = InstructionBar::new(vec![("Enter", "Accept"), ("Esc", "Cancel")]);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn accept_returns_the_edited_value() {
        let mut prompt = PromptState::default();
        prompt.open("Import Project", "path/to/project.filmproj", "draft");
        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Char('t')));

        match prompt.handle_key(key(KeyCode::Enter)) {
            Some(PromptOutcome::Accept(value)) => assert_eq!(value, "draft"),
            other => panic!("expected accept, got {:?}", other),
        }
        assert!(!prompt.visible);
    }
}
