//! Terminal host adapters for the boundary engine.

use std::cell::{Cell, RefCell};
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::terminal;
use serde::Serialize;

use tidemark_core::host::{NotificationSink, ResizeSource, Scheduler, SinkError};
use tidemark_core::{CrossingEvent, CrossingPayload, Dimensions};

/// Terminal size in cells, read through crossterm.
#[derive(Debug)]
pub struct TerminalSource {
    last: Cell<Dimensions>,
    subscribed: Cell<bool>,
}

impl TerminalSource {
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            last: Cell::new(Dimensions::new(u32::from(cols), u32::from(rows))),
            subscribed: Cell::new(false),
        })
    }

    /// Whether resize events should be forwarded to the viewport.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.get()
    }
}

impl ResizeSource for TerminalSource {
    fn dimensions(&self) -> Dimensions {
        match terminal::size() {
            Ok((cols, rows)) => {
                let dims = Dimensions::new(u32::from(cols), u32::from(rows));
                self.last.set(dims);
                dims
            }
            Err(e) => {
                // Keep the previous reading rather than reporting a bogus 0x0.
                tracing::warn!("Failed to read terminal size: {e}");
                self.last.get()
            }
        }
    }

    fn subscribe(&self) {
        self.subscribed.set(true);
    }

    fn unsubscribe(&self) {
        self.subscribed.set(false);
    }
}

/// Runs callbacks on the current `LocalSet`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    event: &'a str,
    bubbles: bool,
    detail: &'a CrossingPayload,
}

/// Writes one JSON object per event: `{"event", "bubbles", "detail"}`.
#[derive(Debug)]
pub struct JsonLineSink<W: Write> {
    out: RefCell<W>,
}

impl JsonLineSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> NotificationSink for JsonLineSink<W> {
    fn dispatch(&self, event: &CrossingEvent) -> Result<(), SinkError> {
        let line = serde_json::to_string(&Envelope {
            event: event.name.as_str(),
            bubbles: event.bubbles,
            detail: &event.payload,
        })?;
        let mut out = self.out.borrow_mut();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
