//! # Shared Frame
//!
//! Hands completed ticks from the simulation thread to a render thread.
//!
//! ```text
//!   simulation thread                    render thread
//!   -----------------                    -------------
//!   advance(dt)
//!   publish() --> back (Mutex) --swap--> front (RwLock) --> read()
//! ```
//!
//! The simulation fills the back buffer, then swaps it with the front
//! under a short write lock. Readers only ever see a whole tick; the
//! swap is the tick boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock, RwLockReadGuard};

use crate::render::{FrameStats, ParticleInstance};

/// One published tick.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// Counters for the tick.
    pub stats: FrameStats,
    /// Everything to draw.
    pub instances: Vec<ParticleInstance>,
}

/// Double-buffered frame shared between one writer and many readers.
#[derive(Default)]
pub struct SharedFrame {
    front: RwLock<Frame>,
    back: Mutex<Frame>,
    published: AtomicU64,
}

impl SharedFrame {
    /// Creates an empty shared frame.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fills the back buffer through `fill`, then makes it the front.
    ///
    /// The back buffer handed to `fill` is the frame from two publishes
    /// ago; `fill` is expected to overwrite it.
    pub fn publish(&self, fill: impl FnOnce(&mut Frame)) {
        let mut back = self.back.lock();
        fill(&mut back);
        std::mem::swap(&mut *self.front.write(), &mut *back);
        self.published.fetch_add(1, Ordering::Release);
    }

    /// Read access to the last published frame.
    ///
    /// Hold the guard briefly: publishing waits for it.
    pub fn read(&self) -> RwLockReadGuard<'_, Frame> {
        self.front.read()
    }

    /// Number of frames published so far.
    #[inline]
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }
}
