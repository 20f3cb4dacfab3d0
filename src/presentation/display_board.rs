// Display board - Latest frame, shared with every renderer
use crate::application::sinks::DisplaySink;
use crate::domain::frame::SignalFrame;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct DisplayBoard {
    frames: Arc<watch::Sender<SignalFrame>>,
    shown: Arc<AtomicBool>,
}

impl DisplayBoard {
    pub fn new() -> Self {
        let (frames, _) = watch::channel(SignalFrame::blank());
        Self {
            frames: Arc::new(frames),
            shown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SignalFrame> {
        self.frames.subscribe()
    }

    pub fn current(&self) -> SignalFrame {
        self.frames.borrow().clone()
    }
}

impl Default for DisplayBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for DisplayBoard {
    // Renderers are woken on the first frame and whenever the picture
    // changes; the stored reading and timestamp are always refreshed.
    fn show(&self, frame: &SignalFrame) {
        let first = !self.shown.swap(true, Ordering::AcqRel);
        self.frames.send_if_modified(|current| {
            let changed = first || !current.same_picture(frame);
            *current = frame.clone();
            changed
        });
    }
}
