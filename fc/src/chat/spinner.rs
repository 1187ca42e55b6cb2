//! Terminal loading animation
//!
//! Purely cosmetic: a detached task animates on stderr while a blocking call
//! is outstanding. It shares no state with the client and is aborted (and its
//! line wiped) when the call returns.

use std::io::{self, Write};
use std::time::Duration;

use tokio::task::JoinHandle;

const FRAMES: [&str; 10] = ["\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}", "\u{2827}", "\u{2807}", "\u{280f}"];

/// A running loading animation.
#[derive(Debug)]
pub struct Spinner {
    handle: JoinHandle<()>,
    width: usize,
}

impl Spinner {
    /// Start animating `message` on stderr.
    pub fn start(message: &str) -> Self {
        let message = message.to_string();
        let width = message.chars().count() + 2;

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            loop {
                eprint!("\r{} {}", FRAMES[frame], message);
                let _ = io::stderr().flush();
                frame = (frame + 1) % FRAMES.len();
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        });

        Self { handle, width }
    }

    /// Stop the animation and wipe its line.
    pub fn stop(self) {
        self.handle.abort();
        eprint!("\r{}\r", " ".repeat(self.width));
        let _ = io::stderr().flush();
    }
}
