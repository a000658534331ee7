use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ktx_config::AppConfig;
use ktx_core::{ContextConfig, ContextItem, SwitchOutcome};
use ktx_tui::widgets::{filter_items, ContextListWidget, StatusMessage};
use ktx_tui::Theme;
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};

use crate::event::{AppEvent, EventHandler};

/// The interactive context picker.
pub struct App {
    running: bool,
    tick_rate: Duration,
    contexts: ContextConfig,
    items: Vec<ContextItem>,
    filter: String,
    filtering: bool,
    selected: usize,
    status: Option<(StatusMessage, Instant)>,
    status_lifetime: Duration,
    show_help: bool,
    title: String,
    prompt: String,
    theme: Theme,
}

impl App {
    /// Live filtering starts active unless a context filter was given on the command line.
    pub fn new(contexts: ContextConfig, config: &AppConfig, config_filter: &str, context_filter: &str) -> Self {
        let items = contexts.display_items(config_filter, context_filter).collect();
        Self {
            running: true,
            tick_rate: Duration::from_millis(config.tick_rate_ms()),
            contexts,
            items,
            filter: String::new(),
            filtering: context_filter.is_empty(),
            selected: 0,
            status: None,
            status_lifetime: Duration::from_secs(config.general.status_message_secs),
            show_help: true,
            title: config.general.title.clone(),
            prompt: config.general.filter_prompt.clone(),
            theme: Theme::from_config(&config.theme),
        }
    }

    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
        let mut events = EventHandler::new(self.tick_rate);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            match events.next().await? {
                AppEvent::Key(key) => self.handle_key(key),
                AppEvent::Tick => self.expire_status(Instant::now()),
                AppEvent::Resize => {}
            }
        }

        Ok(())
    }

    pub fn into_contexts(self) -> ContextConfig {
        self.contexts
    }

    fn render(&self, frame: &mut Frame) {
        let widget = ContextListWidget {
            title: &self.title,
            prompt: &self.prompt,
            items: &self.items,
            filter: &self.filter,
            filtering: self.filtering,
            selected: self.selected,
            status: self.status.as_ref().map(|(status, _)| status),
            show_help: self.show_help,
            theme: &self.theme,
        };
        widget.render(frame, frame.area());
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        match key.code {
            KeyCode::Enter => self.choose(),
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Esc => self.escape(),
            KeyCode::Backspace if self.filtering => {
                self.filter.pop();
                self.selected = 0;
            }
            KeyCode::Char(c) if self.filtering => {
                self.filter.push(c);
                self.selected = 0;
            }
            KeyCode::Char('/') => self.filtering = true,
            KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('H') => self.show_help = !self.show_help,
            KeyCode::Char('q') => self.running = false,
            _ => {}
        }
    }

    fn escape(&mut self) {
        if self.filtering {
            self.filtering = false;
            self.filter.clear();
            self.selected = 0;
        } else if !self.filter.is_empty() {
            self.filter.clear();
            self.selected = 0;
        } else {
            self.running = false;
        }
    }

    fn visible_count(&self) -> usize {
        filter_items(&self.items, &self.filter).len()
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    fn selected_name(&self) -> Option<String> {
        filter_items(&self.items, &self.filter).get(self.selected).map(|item| item.name.clone())
    }

    /// Switch to the selected context. Success ends the picker, failure shows an error and keeps it open.
    fn choose(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };

        match self.contexts.use_context(&name) {
            Ok(SwitchOutcome::Switched(_)) => self.running = false,
            Ok(_) => self.set_error(format!("Context '{name}' not found in kube config files")),
            Err(e) => {
                tracing::debug!(context = %name, error = %e, "switch failed");
                self.set_error(format!("Failed to switch to '{name}': {:#}", anyhow::Error::from(e)));
            }
        }
    }

    fn set_error(&mut self, text: String) {
        self.status = Some((StatusMessage { text, is_error: true }, Instant::now() + self.status_lifetime));
    }

    fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|(_, expires)| now >= *expires) {
            self.status = None;
        }
    }
}

#[cfg(test)]
mod tests;
