//! Terminal progress spinner
//!
//! Animates a message on a background thread while a blocking fetch runs.
//! The spinner is a guard: dropping it stops and joins the thread and clears
//! the line, so it is gone before any output is printed on every exit path.

use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAMES: [char; 4] = ['-', '/', '|', '\\'];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub struct Spinner {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning on stderr; a no-op when stderr is not a terminal
    pub fn start(message: &str) -> Self {
        let stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return Self::disabled();
        }
        Self::start_with_writer(message, stderr)
    }

    /// A spinner that never draws anything
    pub fn disabled() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(true)),
            handle: None,
        }
    }

    pub fn start_with_writer<W: Write + Send + 'static>(message: &str, mut out: W) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let message = message.to_string();

        let spawned = thread::Builder::new()
            .name("spinner".to_string())
            .spawn(move || {
                for frame in FRAMES.iter().cycle() {
                    let _ = write!(out, "\r{} {}", message, frame);
                    let _ = out.flush();
                    thread::park_timeout(FRAME_INTERVAL);
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                }
                let _ = execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine));
            });

        match spawned {
            Ok(handle) => Self {
                stop,
                handle: Some(handle),
            },
            Err(e) => {
                tracing::warn!("Failed to start progress spinner: {}", e);
                Self::disabled()
            }
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the animation and wait for the line to be cleared
    pub fn stop(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("Progress spinner thread panicked");
            }
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}
