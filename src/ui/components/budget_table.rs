//! Budget item table with running total

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::data::{BudgetItem, Currency};

/// Budget table widget: one row per item plus a total line.
/// The total is recomputed from the items on every draw.
pub struct BudgetTable<'a> {
    items: &'a [BudgetItem],
    currency: Currency,
    selected: usize,
}

impl<'a> BudgetTable<'a> {
    pub fn new(items: &'a [BudgetItem], currency: Currency, selected: usize) -> Self {
        Self {
            items,
            currency,
            selected,
        }
    }

    fn item_line(&self, item: &BudgetItem, is_selected: bool, width: usize) -> Line<'a> {
        let marker = if is_selected { "▶ " } else { "  " };
        let base = if is_selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let cost = self.currency.format(item.cost);
        let desc_width = width.saturating_sub(2 + 20 + cost.len() + 4).max(10);

        Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:<w$}", truncate(&item.description, desc_width), w = desc_width),
                base,
            ),
            Span::styled(format!("  {:<18}", truncate(&item.category, 18)), base),
            Span::styled(format!("  {}", cost), base),
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

impl Widget for BudgetTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }

        // Header
        let header = Line::from(vec![Span::styled(
            format!(
                "  {:<30}  {:<18}  {:>12}",
                "Description", "Category", "Cost"
            ),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )]);
        Paragraph::new(header).render(
            Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: 1,
            },
            buf,
        );

        let body = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        };

        if self.items.is_empty() {
            let hint = Paragraph::new("No budget items yet — press 'a' to add one")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            hint.render(body, buf);
        } else {
            let visible = body.height as usize;
            let offset = self
                .selected
                .saturating_sub(visible.saturating_sub(1))
                .min(self.items.len().saturating_sub(visible.max(1)));

            let lines: Vec<Line> = self
                .items
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, item)| self.item_line(item, i == self.selected, area.width as usize))
                .collect();
            Paragraph::new(lines).render(body, buf);
        }

        // Total line, always the sum of what is on screen's backing data
        let total: f64 = self.items.iter().map(|item| item.cost).sum();
        let total_line = Line::from(vec![
            Span::styled("  Total: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.currency.format(total),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", self.currency.code()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        Paragraph::new(total_line).render(
            Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            },
            buf,
        );
    }
}
