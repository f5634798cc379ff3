//! OS touch-injection session.
//!
//! The modern injection sink drives the OS's native touch input through
//! this trait.  Construction initializes a global injection session sized
//! to [`MAX_CONTACTS`]; hosts without the capability fail construction, and
//! the `/win8` connection is rejected.  Every injected contact carries the
//! same fixed pressure, orientation, and contact radius; only position,
//! id, and phase vary per event.

use std::sync::Mutex;

use thiserror::Error;

/// Maximum number of concurrent contacts the injection session supports.
pub const MAX_CONTACTS: u32 = 10;

/// Fixed pressure applied to every injected contact.
pub const PRESSURE: u32 = 32000;

/// Fixed orientation applied to every injected contact.
pub const ORIENTATION: u32 = 0;

/// Fixed contact-area radius in pixels.
pub const RADIUS: i32 = 1;

/// Error type for touch injection.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The host OS lacks the injection capability.
    #[error("touch injection unsupported: {0}")]
    Unsupported(String),

    /// An injection call failed at runtime.
    #[error("injection failed: {0}")]
    Failed(String),
}

/// The phase of an injected contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Down,
    Move,
    Up,
}

/// One single-contact injection request, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedContact {
    pub x: i32,
    pub y: i32,
    pub contact_id: u32,
    pub phase: ContactPhase,
}

/// Trait for issuing single-contact touch injections.
pub trait TouchInjector: Send {
    /// Injects one contact.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Failed`] if the OS rejects the injection.
    fn inject(&self, contact: &InjectedContact) -> Result<(), InjectError>;
}

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock injector that records every contact without touching the OS.
#[derive(Default)]
pub struct MockTouchInjector {
    /// Every injected contact, in call order.
    pub contacts: Mutex<Vec<InjectedContact>>,
    /// When `true`, every call returns an [`InjectError::Failed`].
    pub should_fail: bool,
}

impl MockTouchInjector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TouchInjector for MockTouchInjector {
    fn inject(&self, contact: &InjectedContact) -> Result<(), InjectError> {
        if self.should_fail {
            return Err(InjectError::Failed("mock failure".to_string()));
        }
        self.contacts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(*contact);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
