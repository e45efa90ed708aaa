//! Scene strip list
//!
//! One visual strip per scene, in insertion order, regenerated from the
//! store on every draw.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::data::{Scene, StatusStyle};

/// Strip color for a recognized status label
fn status_color(style: Option<StatusStyle>) -> Color {
    match style {
        Some(StatusStyle::Confirmed) => Color::Green,
        Some(StatusStyle::Pending) => Color::Yellow,
        Some(StatusStyle::Standby) => Color::Cyan,
        Some(StatusStyle::Canceled) => Color::Red,
        None => Color::Gray,
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Scene strip list widget
pub struct StripList<'a> {
    scenes: &'a [Scene],
    selected: usize,
}

impl<'a> StripList<'a> {
    pub fn new(scenes: &'a [Scene], selected: usize) -> Self {
        Self { scenes, selected }
    }

    fn strip_line(&self, scene: &Scene, is_selected: bool) -> Line<'a> {
        let marker = if is_selected { "▶ " } else { "  " };
        let base = if is_selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status = scene.status.to_uppercase();
        let status_style = Style::default()
            .fg(status_color(scene.status_style()))
            .add_modifier(Modifier::BOLD);

        Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(format!("#{:<4}", scene.number), base),
            Span::styled(format!(" {:<28}", truncate(&scene.heading, 28)), base),
            Span::styled(format!(" {:<10}", or_na(&scene.date)), base),
            Span::styled(format!(" {:<6}", or_na(&scene.time)), base),
            Span::styled(
                format!(" {:<20}", truncate(&format!("{}. {}", scene.kind, scene.location), 20)),
                base,
            ),
            Span::styled(format!(" Pgs {:<6}", or_na(&scene.pages)), base),
            Span::styled(format!(" {:<6}", or_na(&scene.duration)), base),
            Span::raw(" "),
            Span::styled(format!("[{}]", status), status_style),
        ])
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

impl Widget for StripList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.scenes.is_empty() {
            let hint = Paragraph::new("No scenes yet — press 'a' to add one")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            hint.render(area, buf);
            return;
        }

        // Keep the selected strip visible
        let visible = area.height as usize;
        let offset = self
            .selected
            .saturating_sub(visible.saturating_sub(1))
            .min(self.scenes.len().saturating_sub(visible.max(1)));

        let lines: Vec<Line> = self
            .scenes
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, scene)| self.strip_line(scene, i == self.selected))
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_gets_default_color() {
        assert_eq!(status_color(StatusStyle::for_label("wrapped")), Color::Gray);
        assert_eq!(
            status_color(StatusStyle::for_label("Confirmed")),
            Color::Green
        );
    }

    #[test]
    fn truncate_preserves_short_text() {
        assert_eq!(truncate("INT. OFFICE", 28), "INT. OFFICE");
        assert_eq!(truncate("ABCDEFGH", 4), "ABC…");
    }
}
