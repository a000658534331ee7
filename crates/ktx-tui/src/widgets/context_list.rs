use ktx_core::ContextItem;
use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Items whose label contains `filter`, ignoring case.
pub fn filter_items<'a>(items: &'a [ContextItem], filter: &str) -> Vec<&'a ContextItem> {
    let filter_lower = filter.to_lowercase();
    items.iter().filter(|item| filter_lower.is_empty() || item.name.to_lowercase().contains(&filter_lower)).collect()
}

pub struct ContextListWidget<'a> {
    pub title: &'a str,
    pub prompt: &'a str,
    pub items: &'a [ContextItem],
    pub filter: &'a str,
    pub filtering: bool,
    pub selected: usize,
    pub status: Option<&'a StatusMessage>,
    pub show_help: bool,
    pub theme: &'a Theme,
}

impl<'a> ContextListWidget<'a> {
    pub fn filtered_items(&self) -> Vec<&'a ContextItem> {
        filter_items(self.items, self.filter)
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let area = area.inner(Margin { horizontal: 2, vertical: 1 });

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(if self.show_help { 1 } else { 0 }),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(format!(" {} ", self.title), t.title)));
        frame.render_widget(title, chunks[0]);

        let filtered = self.filtered_items();
        frame.render_widget(self.filter_line(filtered.len()), chunks[1]);

        let list_items: Vec<ListItem> = filtered
            .iter()
            .map(|item| {
                ListItem::new(Text::from(vec![
                    Line::from(Span::styled(format!("  {}", item.name), Style::default().fg(t.fg))),
                    Line::from(Span::styled(format!("  {}", item.description), t.description)),
                ]))
            })
            .collect();
        let list = List::new(list_items).highlight_style(t.selection);
        let mut list_state = ListState::default()
            .with_selected(if filtered.is_empty() { None } else { Some(self.selected.min(filtered.len() - 1)) });
        frame.render_stateful_widget(list, chunks[2], &mut list_state);

        if let Some(status) = self.status {
            let style = if status.is_error { t.error } else { t.status };
            frame.render_widget(Paragraph::new(format!(" {}", status.text)).style(style), chunks[3]);
        }

        if self.show_help {
            let hints = Paragraph::new(" enter:choose  /:filter  ↑/k ↓/j:move  esc:back  q:quit  H:toggle help")
                .style(t.text_dim);
            frame.render_widget(hints, chunks[4]);
        }
    }

    fn filter_line(&self, matches: usize) -> Paragraph<'static> {
        let t = self.theme;
        let count = format!("{matches}/{} contexts", self.items.len());
        if self.filtering || !self.filter.is_empty() {
            let cursor = if self.filtering { "█" } else { "" };
            Paragraph::new(Line::from(vec![
                Span::styled(self.prompt.to_string(), Style::default().fg(t.accent)),
                Span::styled(format!("{}{cursor}", self.filter), Style::default().fg(t.fg)),
                Span::styled(format!("  {count}"), t.text_dim),
            ]))
        } else {
            Paragraph::new(Span::styled(count, t.text_dim))
        }
    }
}
