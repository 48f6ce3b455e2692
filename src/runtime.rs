use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the app loop reacts to
#[derive(Clone, Debug)]
pub enum BurstEvent {
    Key(KeyEvent),
    /// Terminal focus gained (`true`) or lost
    Focus(bool),
    Resize,
    Tick,
}

impl BurstEvent {
    /// The terminal events the app cares about; key releases, mouse and
    /// paste events are dropped.
    pub fn from_terminal(event: CtEvent) -> Option<Self> {
        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            CtEvent::FocusGained => Some(Self::Focus(true)),
            CtEvent::FocusLost => Some(Self::Focus(false)),
            CtEvent::Resize(_, _) => Some(Self::Resize),
            _ => None,
        }
    }
}

/// Read terminal events on a background thread until the receiver is dropped.
pub fn spawn_terminal_reader() -> Receiver<BurstEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        match event::read() {
            Ok(raw) => {
                if let Some(evt) = BurstEvent::from_terminal(raw) {
                    if tx.send(evt).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                log::error!("terminal event stream failed: {e}");
                break;
            }
        }
    });

    rx
}

/// Interleaves queued events with ticks on a fixed schedule. A steady stream
/// of keys never holds a tick back past its deadline.
pub struct Runner {
    events: Receiver<BurstEvent>,
    tick: Duration,
    next_tick: Instant,
}

impl Runner {
    pub fn new(events: Receiver<BurstEvent>, tick: Duration) -> Self {
        Self {
            events,
            tick,
            next_tick: Instant::now() + tick,
        }
    }

    /// A runner fed by the real terminal
    pub fn terminal(tick: Duration) -> Self {
        Self::new(spawn_terminal_reader(), tick)
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    /// The next queued event, or `Tick` once the tick deadline has passed
    pub fn step(&mut self) -> BurstEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.tick_now(now);
        }

        match self.events.recv_timeout(self.next_tick - now) {
            Ok(evt) => evt,
            Err(RecvTimeoutError::Timeout) => self.tick_now(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                // nothing left to read; keep ticking on schedule
                thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.tick_now(Instant::now())
            }
        }
    }

    fn tick_now(&mut self, now: Instant) -> BurstEvent {
        self.next_tick = now + self.tick;
        BurstEvent::Tick
    }
}
