//! Budget entry form

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
use crate::data::Currency;

const FIELD_LABELS: [&str; 3] = ["Description", "Category", "Cost"];

/// What a handled keystroke produced
#[derive(Debug)]
pub enum BudgetFormOutcome {
    /// User submitted a valid item
    Submit {
        description: String,
        category: String,
        cost: f64,
    },
    /// Submission rejected before any state change
    Invalid(String),
    /// User dismissed the form
    Cancel,
}

/// State for the budget entry form
pub struct BudgetFormState {
    pub visible: bool,
    focus: usize,
    inputs: [TextInputState; 3],
    currency: Currency,
}

impl Default for BudgetFormState {
    fn default() -> Self {
        Self {
            visible: false,
            focus: 0,
            inputs: [
                TextInputState::new(),
                TextInputState::new(),
                TextInputState::new(),
            ],
            currency: Currency::Usd,
        }
    }
}

impl BudgetFormState {
    /// Open the form with empty fields; the currency only affects the
    /// cost placeholder.
    pub fn open(&mut self, currency: Currency) {
        *self = Self::default();
        self.currency = currency;
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

    /// Validate and assemble the submission. The cost must parse as a
    /// finite number; nothing is mutated on rejection.
    fn submit(&self) -> BudgetFormOutcome {
        let raw_cost = self.inputs[2].value();
        match raw_cost.trim().parse::<f64>() {
            Ok(cost) if cost.is_finite() => BudgetFormOutcome::Submit {
                description: self.inputs[0].value(),
                category: self.inputs[1].value(),
                cost,
            },
            _ => BudgetFormOutcome::Invalid("Please enter a valid cost.".to_string()),
        }
    }

    /// Route a keystroke. Returns an outcome when the form is done or
    /// a submission was rejected.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<BudgetFormOutcome> {
        match key.code {
            KeyCode::Esc => {
                self.close();
                return Some(BudgetFormOutcome::Cancel);
            }
            KeyCode::Enter => {
                let outcome = self.submit();
                if matches!(outcome, BudgetFormOutcome::Submit { .. }) {
                    self.close();
                }
                return Some(outcome);
            }
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Left => self.inputs[self.focus].move_left(),
            KeyCode::Right => self.inputs[self.focus].move_right(),
            KeyCode::Home => self.inputs[self.focus].move_start(),
            KeyCode::End => self.inputs[self.focus].move_end(),
            KeyCode::Backspace => self.inputs[self.focus].delete_char(),
            KeyCode::Delete => self.inputs[self.focus].delete_forward(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.inputs[self.focus].delete_to_start()
            }
            KeyCode::Char(c) => self.inputs[self.focus].insert_char(c),
            _ => {}
        }
        None
    }
}

/// Budget entry form widget
pub struct BudgetForm<'a> {
    state: &'a BudgetFormState,
}

impl<'a> BudgetForm<'a> {
    pub fn new(state: &'a BudgetFormState) -> Self {
        Self { state }
    }
}

impl Widget for BudgetForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        let frame = DialogFrame::new("New Budget Item", 54, 7);
        let inner = frame.render(area, buf);

        let cost_placeholder = format!("Cost ({})", self.state.currency.symbol());
        let placeholders = ["Crane rental", "Grip", cost_placeholder.as_str()];

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
                format!("{:>12}: ", label),
                label_style,
            )))
            .render(
                Rect {
                    x: inner.x,
                    y,
                    width: 15.min(inner.width),
                    height: 1,
                },
                buf,
            );

            let value_area = Rect {
                x: inner.x + 15,
                y,
                width: inner.width.saturating_sub(15),
                height: 1,
            };
            self.state.inputs[i].render(value_area, buf, placeholders[i], focused);
        }

        let instructions = InstructionBar::new(vec![
            ("Tab", "Next"),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut BudgetFormState, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn valid_cost_submits() {
        let mut form = BudgetFormState::default();
        form.open(Currency::Usd);
        type_text(&mut form, "Permit");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "Locations");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, " 50.5 ");

        match form.handle_key(key(KeyCode::Enter)) {
            Some(BudgetFormOutcome::Submit {
                description,
                category,
                cost,
            }) => {
                assert_eq!(description, "Permit");
                assert_eq!(category, "Locations");
                assert_eq!(cost, 50.5);
            }
            other => panic!("expected submit, got {:?}", other),
        }
        assert!(!form.visible);
    }

    #[test]
    fn non_numeric_cost_is_rejected() {
        let mut form = BudgetFormState::default();
        form.open(Currency::Usd);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "abc");

        assert!(matches!(
            form.handle_key(key(KeyCode::Enter)),
            Some(BudgetFormOutcome::Invalid(_))
        ));
        // The form stays open so the user can fix the field
        assert!(form.visible);
    }

    #[test]
    fn nan_and_empty_costs_are_rejected() {
        for bad in ["", "NaN", "inf", "12abc"] {
            let mut form = BudgetFormState::default();
            form.open(Currency::Usd);
            form.handle_key(key(KeyCode::Tab));
            form.handle_key(key(KeyCode::Tab));
            type_text(&mut form, bad);
            assert!(
                matches!(
                    form.handle_key(key(KeyCode::Enter)),
                    Some(BudgetFormOutcome::Invalid(_))
                ),
                "cost {:?} should be rejected",
                bad
            );
        }
    }
}
