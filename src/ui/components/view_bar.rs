//! View switcher bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::events::ActiveView;

/// Bar for switching between the schedule and budget views
pub struct ViewBar {
    active: ActiveView,
}

impl ViewBar {
    pub fn new(active: ActiveView) -> Self {
        Self { active }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, view) in [ActiveView::Schedule, ActiveView::Budget].iter().enumerate() {
            let is_active = *view == self.active;

            if is_active {
                spans.push(Span::styled(" ▶ ", Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::raw("   "));
            }

            let style = if is_active {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("[{}] {}", i + 1, view.title()), style));
            spans.push(Span::raw("  "));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 20)));
        paragraph.render(area, buf);
    }
}
