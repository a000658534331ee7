use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Terminal input read on a dedicated thread, interleaved with ticks for expiring status messages.
pub struct EventHandler {
    input: mpsc::UnboundedReceiver<AppEvent>,
    ticks: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, input) = mpsc::unbounded_channel();

        thread::spawn(move || {
            while !tx.is_closed() {
                match event::poll(INPUT_POLL) {
                    Ok(false) => {}
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if let Some(ev) = translate(ev) {
                                if tx.send(ev).is_err() {
                                    break;
                                }
                            }
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "terminal read failed");
                            break;
                        }
                    },
                    Err(e) => {
                        tracing::debug!(error = %e, "terminal poll failed");
                        break;
                    }
                }
            }
        });

        let mut ticks = time::interval(tick_rate);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { input, ticks }
    }

    pub async fn next(&mut self) -> anyhow::Result<AppEvent> {
        tokio::select! {
            ev = self.input.recv() => ev.ok_or_else(|| anyhow::anyhow!("terminal input closed")),
            _ = self.ticks.tick() => Ok(AppEvent::Tick),
        }
    }
}

// Some terminals report key releases and repeats as separate events.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> KeyEvent {
        KeyEvent { code: KeyCode::Char('j'), modifiers: KeyModifiers::NONE, kind, state: KeyEventState::NONE }
    }

    #[test]
    fn only_key_presses_are_forwarded() {
        assert_eq!(translate(Event::Key(key(KeyEventKind::Press))), Some(AppEvent::Key(key(KeyEventKind::Press))));
        assert_eq!(translate(Event::Key(key(KeyEventKind::Release))), None);
        assert_eq!(translate(Event::Key(key(KeyEventKind::Repeat))), None);
    }

    #[test]
    fn resize_and_focus() {
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
