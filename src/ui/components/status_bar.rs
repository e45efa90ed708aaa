//! Status bar: project info on the left, transient messages in the
//! middle, store counts and currency on the right

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::data::Currency;

/// A transient user-facing message (validation failures, share/import
/// results)
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Status bar component
pub struct StatusBar<'a> {
    project_name: &'a str,
    scene_count: usize,
    item_count: usize,
    currency: Currency,
    message: Option<&'a StatusMessage>,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        project_name: &'a str,
        scene_count: usize,
        item_count: usize,
        currency: Currency,
        message: Option<&'a StatusMessage>,
    ) -> Self {
        Self {
            project_name,
            scene_count,
            item_count,
            currency,
            message,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let right = format!(
            "{} scenes · {} items · {} ",
            self.scene_count,
            self.item_count,
            self.currency.code()
        );

        let mut spans = vec![Span::styled(
            format!(" {} ", self.project_name),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(message) = self.message {
            let style = if message.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(message.text.clone(), style));
        }

        // Pad so the counts sit on the right edge
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let pad = (area.width as usize)
            .saturating_sub(used)
            .saturating_sub(right.chars().count());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(right, Style::default().fg(Color::DarkGray)));

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::Rgb(20, 20, 20)))
            .render(area, buf);
    }
}
