//! The seam between the engine and the hosting browser shell.
//!
//! The engine never touches `window` or the DOM; everything it needs from
//! the embedding environment comes through [`Host`]. Tests drive the engine
//! with an in-memory host; a real embedding forwards to the browser.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::LockdownError;

/// Browser family, as far as lockdown preconditions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chromium,
    Firefox,
    Other,
}

/// Window and screen geometry at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub outer_width: u32,
    pub outer_height: u32,
    pub inner_width: u32,
    pub inner_height: u32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl WindowGeometry {
    /// Whether the window is maximized and chrome-free: the outer window
    /// covers the screen and the viewport covers the outer window.
    pub fn is_fullscreen(&self) -> bool {
        let maximized = self.outer_height >= self.screen_height;
        let full_height = self.inner_height >= self.outer_height;
        let full_width = self.inner_width >= self.outer_width;
        maximized && full_height && full_width
    }
}

/// A capability snapshot, re-queried whenever a predicate needs fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    pub browser: BrowserFamily,
    pub geometry: WindowGeometry,
}

/// Integrity-relevant events surfaced by the host shell.
///
/// Pure input-suppression concerns (blocking save/print key chords, the
/// context menu) stay inside the shell; only events a lockdown rule may
/// turn into an anomaly cross this seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The window lost focus.
    Blur,
    /// The window was resized.
    Resize,
    /// The fullscreen state changed.
    FullscreenChange,
    /// The pointer moved out of the window entirely.
    MouseOut {
        /// True when the pointer actually left the window, as opposed to
        /// crossing into a child element.
        left_window: bool,
    },
    /// The page is about to be unloaded.
    BeforeUnload,
}

/// Capabilities the engine needs from the hosting environment.
#[async_trait]
pub trait Host: Send + Sync {
    /// Current browser family and window geometry.
    fn capabilities(&self) -> HostCapabilities;

    /// Request fullscreen and wait until the transition settles.
    async fn enter_fullscreen(&self) -> Result<(), LockdownError>;

    /// Clear the system clipboard. Failures are tolerated by callers.
    async fn clear_clipboard(&self) -> Result<(), LockdownError>;

    /// Navigate away from the exam. Must be idempotent.
    async fn lock_out(&self);

    /// Subscribe to integrity-relevant events.
    fn events(&self) -> broadcast::Receiver<HostEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (u32, u32) = (1920, 1080);

    fn geometry(outer: (u32, u32), inner: (u32, u32)) -> WindowGeometry {
        WindowGeometry {
            outer_width: outer.0,
            outer_height: outer.1,
            inner_width: inner.0,
            inner_height: inner.1,
            screen_width: SCREEN.0,
            screen_height: SCREEN.1,
        }
    }

    #[test]
    fn fullscreen_when_window_covers_screen_and_viewport_covers_window() {
        assert!(geometry((1920, 1080), (1920, 1080)).is_fullscreen());
    }

    #[test]
    fn not_fullscreen_when_windowed_or_chrome_visible() {
        // Smaller than the screen.
        assert!(!geometry((1600, 900), (1600, 900)).is_fullscreen());
        // Covers the screen, but browser chrome eats into the viewport.
        assert!(!geometry((1920, 1080), (1920, 996)).is_fullscreen());
    }
}
