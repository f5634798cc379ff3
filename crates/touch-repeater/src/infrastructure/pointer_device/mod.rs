//! Pointer simulation device.
//!
//! The pointer sink drives an OS cursor through this trait: an absolute
//! move plus a left-button press/release, all in pixel coordinates.  The
//! [`MockPointerDevice`] is always compiled so the sink can be tested on
//! any platform; the Windows implementation injects real input via
//! `SetCursorPos` and `SendInput`.

use std::sync::Mutex;

use thiserror::Error;

/// Error type for pointer injection.
#[derive(Debug, Error)]
pub enum PointerError {
    /// The platform input call failed.
    #[error("platform pointer error: {0}")]
    Platform(String),
}

/// Trait for issuing pointer actions in pixel coordinates.
pub trait PointerDevice: Send {
    /// Moves the cursor to an absolute pixel position.
    fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError>;

    /// Presses the primary button at the given position.
    fn press(&self, x: i32, y: i32) -> Result<(), PointerError>;

    /// Releases the primary button at the given position.
    fn release(&self, x: i32, y: i32) -> Result<(), PointerError>;
}

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use self::windows::WindowsPointerDevice as NativePointerDevice;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// One recorded pointer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Move(i32, i32),
    Press(i32, i32),
    Release(i32, i32),
}

/// A mock device that records all actions without touching the OS.
#[derive(Default)]
pub struct MockPointerDevice {
    /// Every action in call order.
    pub actions: Mutex<Vec<PointerAction>>,
    /// When `true`, every call returns a [`PointerError::Platform`].
    pub should_fail: bool,
}

impl MockPointerDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, action: PointerAction) -> Result<(), PointerError> {
        if self.should_fail {
            return Err(PointerError::Platform("mock failure".to_string()));
        }
        self.actions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(action);
        Ok(())
    }
}

impl PointerDevice for MockPointerDevice {
    fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError> {
        self.record(PointerAction::Move(x, y))
    }

    fn press(&self, x: i32, y: i32) -> Result<(), PointerError> {
        self.record(PointerAction::Press(x, y))
    }

    fn release(&self, x: i32, y: i32) -> Result<(), PointerError> {
        self.record(PointerAction::Release(x, y))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
