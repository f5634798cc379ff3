//! Platform display enumeration.
//!
//! Sinks that map normalized coordinates into pixel space need to know the
//! connected monitors and their work-area rectangles.  Each platform
//! implements [`ScreenEnumerator`]; the list is queried once per forwarder
//! construction and the snapshot is never refreshed: a monitor change
//! after connect does not retroactively update an open session.
//!
//! A [`MockScreenEnumerator`] is always compiled (not guarded by `#[cfg]`)
//! so tests on any platform can run without a physical display.

use thiserror::Error;
use touch_core::display::DisplayInfo;

/// Error type for display enumeration.
#[derive(Debug, Error)]
pub enum ScreenInfoError {
    /// The platform API call to enumerate displays failed.
    #[error("platform API error while enumerating displays: {0}")]
    Platform(String),
}

/// Trait for enumerating the connected displays.
///
/// Implementors return an ordered list; sinks index into it with the
/// validated `screen` argument.
pub trait ScreenEnumerator: Send + Sync {
    /// Returns the ordered list of connected displays.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenInfoError::Platform`] if the OS API call fails.
    fn query_displays(&self) -> Result<Vec<DisplayInfo>, ScreenInfoError>;
}

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use self::windows::WindowsScreenEnumerator as NativeScreenEnumerator;

// ── Mock implementation (always compiled for tests) ───────────────────────────

use touch_core::display::Rect;

/// A mock enumerator that returns a configurable display list.
///
/// Makes no OS calls; the list is provided at construction time.
pub struct MockScreenEnumerator {
    /// The fixed list of displays this enumerator always returns.
    pub displays: Vec<DisplayInfo>,
}

impl MockScreenEnumerator {
    /// One 1920×1080 display whose work area excludes a 40-pixel taskbar.
    pub fn single_1080p() -> Self {
        Self {
            displays: vec![DisplayInfo {
                index: 0,
                device_name: r"\\.\DISPLAY1".to_string(),
                monitor: Rect::new(0, 0, 1920, 1080),
                work_area: Rect::new(0, 0, 1920, 1040),
            }],
        }
    }

    /// Two 1920×1080 displays side by side, taskbar on the primary only.
    pub fn dual_1080p() -> Self {
        Self {
            displays: vec![
                DisplayInfo {
                    index: 0,
                    device_name: r"\\.\DISPLAY1".to_string(),
                    monitor: Rect::new(0, 0, 1920, 1080),
                    work_area: Rect::new(0, 0, 1920, 1040),
                },
                DisplayInfo {
                    index: 1,
                    device_name: r"\\.\DISPLAY2".to_string(),
                    monitor: Rect::new(1920, 0, 1920, 1080),
                    work_area: Rect::new(1920, 0, 1920, 1080),
                },
            ],
        }
    }

    /// An enumerator with no displays at all (headless host).
    pub fn headless() -> Self {
        Self {
            displays: Vec::new(),
        }
    }
}

impl ScreenEnumerator for MockScreenEnumerator {
    fn query_displays(&self) -> Result<Vec<DisplayInfo>, ScreenInfoError> {
        Ok(self.displays.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
