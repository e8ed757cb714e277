//! Frame pacing for mostly static screens.
//!
//! While the game is running every frame is drawn. Paused, idle, and
//! game-over screens only change on input, so they are redrawn when their
//! content changes and otherwise at a low rate (wildcard blocks still
//! cycle).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::RenderSnapshot;

/// Content hash of a snapshot.
pub fn snapshot_fingerprint(snap: &RenderSnapshot) -> u64 {
    let mut hasher = DefaultHasher::new();
    snap.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render (e.g. after a terminal resize).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false`: always render (no throttling).
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let render = !self.has_rendered
            || !is_static
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if render {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        render
    }

    /// [`should_render`](Self::should_render) for a snapshot; anything but
    /// `Playing` counts as static.
    pub fn should_render_snapshot(&mut self, now_ms: u64, snap: &RenderSnapshot) -> bool {
        self.should_render(now_ms, snapshot_fingerprint(snap), !snap.playable())
    }
}
