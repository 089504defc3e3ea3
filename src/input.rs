//! Operator input
//!
//! The launcher asks a `ChoiceSource` for one line at a time. The stdin
//! implementation reads on a helper thread, one line per request, so the
//! prompt can return on Ctrl-C while the read stays pending. No read is
//! outstanding while an agent runs, leaving stdin to the child.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Result of waiting at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Line(String),
    Interrupted,
    Eof,
}

pub(crate) trait ChoiceSource {
    fn next_choice(&mut self) -> io::Result<Input>;
}

enum Event {
    Line(io::Result<Option<String>>),
    Interrupt,
}

pub(crate) struct StdinSource {
    requests: Sender<()>,
    events: Receiver<Event>,
    pending: bool,
    waiting: Arc<AtomicBool>,
}

impl StdinSource {
    /// Start the reader thread on stdin. The returned callback injects an
    /// interrupt into the prompt and is meant for the Ctrl-C handler.
    pub(crate) fn spawn() -> io::Result<(Self, impl Fn() + Send + Sync + 'static)> {
        Self::spawn_with(|| io::stdin().lock())
    }

    /// `open` runs on the reader thread and yields the line reader.
    pub(crate) fn spawn_with<R: BufRead>(
        open: impl FnOnce() -> R + Send + 'static,
    ) -> io::Result<(Self, impl Fn() + Send + Sync + 'static)> {
        let (request_tx, request_rx) = mpsc::channel::<()>();
        let (event_tx, event_rx) = mpsc::channel::<Event>();

        let line_tx = event_tx.clone();
        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let mut reader = open();
                for () in request_rx {
                    let result = read_line(&mut reader);
                    if line_tx.send(Event::Line(result)).is_err() {
                        break;
                    }
                }
            })?;

        let waiting = Arc::new(AtomicBool::new(false));
        let prompt_waiting = Arc::clone(&waiting);
        let notify = move || {
            if prompt_waiting.load(Ordering::SeqCst) {
                let _ = event_tx.send(Event::Interrupt);
            }
        };
        let source = StdinSource {
            requests: request_tx,
            events: event_rx,
            pending: false,
            waiting,
        };
        Ok((source, notify))
    }
}

impl ChoiceSource for StdinSource {
    fn next_choice(&mut self) -> io::Result<Input> {
        // Interrupts that slipped in after the last wait ended are stale
        while let Ok(event) = self.events.try_recv() {
            if let Event::Line(result) = event {
                self.pending = false;
                return Ok(result?.map_or(Input::Eof, Input::Line));
            }
        }
        if !self.pending {
            // Reader gone means stdin is finished
            if self.requests.send(()).is_err() {
                return Ok(Input::Eof);
            }
            self.pending = true;
        }

        self.waiting.store(true, Ordering::SeqCst);
        let event = self.events.recv();
        self.waiting.store(false, Ordering::SeqCst);
        match event {
            Ok(Event::Interrupt) => Ok(Input::Interrupted),
            Ok(Event::Line(result)) => {
                self.pending = false;
                Ok(result?.map_or(Input::Eof, Input::Line))
            }
            Err(_) => Ok(Input::Eof),
        }
    }
}

/// One line without its terminator; `None` at end of input.
/// Invalid UTF-8 is replaced rather than rejected.
fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
