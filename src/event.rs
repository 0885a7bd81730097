//! The single event queue the dashboard drains.
//!
//! Keyboard input, animation pulses and feed samples all arrive through one
//! channel, so state is only ever touched by the consuming loop.

use crate::models::disk::IoCounters;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::io;
use std::sync::mpsc::{self, Receiver, RecvError, Sender};
#[cfg(test)]
use std::sync::mpsc::TryRecvError;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input.
    Key(KeyEvent),
    /// One counter snapshot from the feed.
    Sample {
        endpoint: String,
        counters: IoCounters,
        is_final: bool,
    },
    /// The feed closed without a final sample.
    FeedEnded,
    /// Animation tick.
    Pulse,
}

pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Empty queue. Feeds attach through [`EventHandler::sender`].
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { rx, tx }
    }

    /// Start a thread polling the terminal; a poll timeout becomes a pulse.
    pub fn watch_terminal(&self, pulse_rate: Duration) {
        let event_tx = self.tx.clone();

        thread::spawn(move || pump_terminal(pulse_rate, &event_tx, event::poll, event::read));
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Blocks until the next event.
    pub fn next(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }

    #[cfg(test)]
    pub fn try_next(&self) -> Result<Event, TryRecvError> {
        self.rx.try_recv()
    }
}

/// Input loop body. A poll or read failure ends the loop instead of being
/// mistaken for a timeout.
fn pump_terminal<P, R>(pulse_rate: Duration, tx: &Sender<Event>, mut poll: P, mut read: R)
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<CrosstermEvent>,
{
    loop {
        let ready = match poll(pulse_rate) {
            Ok(ready) => ready,
            Err(e) => {
                warn!("terminal poll failed, input thread exiting: {e}");
                break;
            }
        };
        let event = if ready {
            match read() {
                Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                Ok(_) => continue,
                Err(e) => {
                    warn!("terminal read failed, input thread exiting: {e}");
                    break;
                }
            }
        } else {
            Event::Pulse
        };
        if tx.send(event).is_err() {
            debug!("event queue closed, input thread exiting");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_send_order() {
        let q = EventHandler::new();
        let tx = q.sender();
        tx.send(Event::Pulse).unwrap();
        tx.send(Event::FeedEnded).unwrap();
        assert!(matches!(q.next(), Ok(Event::Pulse)));
        assert!(matches!(q.next(), Ok(Event::FeedEnded)));
    }

    #[test]
    fn senders_on_other_threads_merge_into_one_queue() {
        let q = EventHandler::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tx = q.sender();
                thread::spawn(move || {
                    tx.send(Event::Sample {
                        endpoint: format!("d{}", i),
                        counters: IoCounters::default(),
                        is_final: false,
                    })
                    .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let mut seen: Vec<String> = (0..4)
            .map(|_| match q.next() {
                Ok(Event::Sample { endpoint, .. }) => endpoint,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["d0", "d1", "d2", "d3"]);
    }

    #[test]
    fn poll_failure_stops_input_without_pulses() {
        let q = EventHandler::new();
        let tx = q.sender();
        let mut polls = 0;
        pump_terminal(
            Duration::from_millis(1),
            &tx,
            |_| {
                polls += 1;
                Err(io::Error::new(io::ErrorKind::Other, "no tty"))
            },
            || unreachable!("read after failed poll"),
        );
        assert_eq!(polls, 1);
        assert!(matches!(q.try_next(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn timeouts_pulse_and_ready_input_is_read() {
        let q = EventHandler::new();
        let tx = q.sender();
        let mut script = vec![Ok(true), Ok(false)].into_iter();
        pump_terminal(
            Duration::from_millis(1),
            &tx,
            |_| script.next().unwrap_or_else(|| Err(io::Error::new(io::ErrorKind::Other, "done"))),
            || Ok(CrosstermEvent::Key(KeyEvent::from(crossterm::event::KeyCode::Char('q')))),
        );
        assert!(matches!(q.try_next(), Ok(Event::Key(_))));
        assert!(matches!(q.try_next(), Ok(Event::Pulse)));
        assert!(matches!(q.try_next(), Err(TryRecvError::Empty)));
    }
}
