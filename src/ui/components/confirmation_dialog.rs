//! Delete confirmation dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use uuid::Uuid;

use super::dialog::{DialogFrame, InstructionBar};

/// What the pending confirmation would delete
#[derive(Debug, Clone, Copy)]
pub enum ConfirmationContext {
    /// Removing a scene from the schedule
    DeleteScene(Uuid),
    /// Removing a line item from the budget
    DeleteBudgetItem(Uuid),
}

/// State for the confirmation dialog
#[derive(Debug, Clone, Default)]
pub struct ConfirmationDialogState {
    /// Whether the dialog is visible
    pub visible: bool,
    /// Dialog title
    pub title: String,
    /// Main message to display
    pub message: String,
    /// Currently selected button (0 = Cancel, 1 = Delete)
    pub selected: usize,
    /// The action being confirmed
    pub context: Option<ConfirmationContext>,
}

impl ConfirmationDialogState {
    /// Show the dialog for the given deletion
    pub fn show(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        context: ConfirmationContext,
    ) {
        self.visible = true;
        self.title = title.into();
        self.message = message.into();
        self.selected = 0; // Default to Cancel for safety
        self.context = Some(context);
    }

    /// Hide the dialog and reset state
    pub fn hide(&mut self) {
        self.visible = false;
        self.context = None;
    }

    /// Toggle selection between Cancel and Delete
    pub fn toggle_selection(&mut self) {
        self.selected = if self.selected == 0 { 1 } else { 0 };
    }

    pub fn is_confirm_selected(&self) -> bool {
        self.selected == 1
    }
}

/// Confirmation dialog widget
pub struct ConfirmationDialog<'a> {
    state: &'a ConfirmationDialogState,
}

impl<'a> ConfirmationDialog<'a> {
    pub fn new(state: &'a ConfirmationDialogState) -> Self {
        Self { state }
    }
}

impl Widget for ConfirmationDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        let dialog_width: u16 = 50;
        let dialog_height: u16 = 8;

        let frame = DialogFrame::new(&self.state.title, dialog_width, dialog_height)
            .border_color(Color::Red);
        let inner = frame.render(area, buf);

        if inner.height < 4 {
            return;
        }

        let message = Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        message.render(
            Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 2,
            },
            buf,
        );

        let cancel_style = if self.state.is_confirm_selected() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let confirm_style = if self.state.is_confirm_selected() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };

        let buttons = Paragraph::new(Line::from(vec![
            Span::styled(" Cancel ", cancel_style),
            Span::raw("    "),
            Span::styled(" Delete ", confirm_style),
        ]))
        .alignment(Alignment::Center);
        buttons.render(
            Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(3),
                width: inner.width,
                height: 1,
            },
            buf,
        );

        let instructions = InstructionBar::new(vec![
            ("←/→", "Select"),
            ("Enter", "Confirm"),
            ("Esc", "Cancel"),
            ("y/n", "Quick"),
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

    #[test]
    fn show_defaults_to_cancel() {
        let mut state = ConfirmationDialogState::default();
        state.show(
            "Delete Scene",
            "Are you sure?",
            ConfirmationContext::DeleteScene(Uuid::new_v4()),
        );
        assert!(state.visible);
        assert!(!state.is_confirm_selected());

        state.toggle_selection();
        assert!(state.is_confirm_selected());

        state.hide();
        assert!(!state.visible);
        assert!(state.context.is_none());
    }
}
