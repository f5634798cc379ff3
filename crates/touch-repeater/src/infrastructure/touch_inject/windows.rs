//! Windows touch injection via `InitializeTouchInjection` / `InjectTouchInput`.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::Pointer::{
    InitializeTouchInjection, InjectTouchInput, POINTER_INFO, POINTER_TOUCH_INFO,
    TOUCH_FEEDBACK_DEFAULT, TOUCH_FLAG_NONE, TOUCH_MASK_CONTACTAREA, TOUCH_MASK_ORIENTATION,
    TOUCH_MASK_PRESSURE,
};
use windows::Win32::UI::WindowsAndMessaging::{
    POINTER_FLAG_DOWN, POINTER_FLAG_INCONTACT, POINTER_FLAG_INRANGE, POINTER_FLAG_UP,
    POINTER_FLAG_UPDATE, PT_TOUCH,
};

use super::{
    ContactPhase, InjectError, InjectedContact, TouchInjector, MAX_CONTACTS, ORIENTATION,
    PRESSURE, RADIUS,
};

/// Windows implementation of [`TouchInjector`].
///
/// `InitializeTouchInjection` fails on hosts below Windows 8, which is how
/// the capability check surfaces.
pub struct WindowsTouchInjector;

impl WindowsTouchInjector {
    /// Initializes the global injection session.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Unsupported`] when the OS rejects the
    /// initialization (no touch-injection capability).
    pub fn initialize() -> Result<WindowsTouchInjector, InjectError> {
        // SAFETY: no pointers; the call configures process-global state.
        unsafe {
            InitializeTouchInjection(MAX_CONTACTS, TOUCH_FEEDBACK_DEFAULT).map_err(|e| {
                InjectError::Unsupported(format!("InitializeTouchInjection failed: {e}"))
            })?;
        }
        Ok(WindowsTouchInjector)
    }
}

impl TouchInjector for WindowsTouchInjector {
    fn inject(&self, contact: &InjectedContact) -> Result<(), InjectError> {
        let pointer_flags = match contact.phase {
            ContactPhase::Down => POINTER_FLAG_DOWN | POINTER_FLAG_INRANGE | POINTER_FLAG_INCONTACT,
            ContactPhase::Move => {
                POINTER_FLAG_UPDATE | POINTER_FLAG_INRANGE | POINTER_FLAG_INCONTACT
            }
            ContactPhase::Up => POINTER_FLAG_UP,
        };

        let mut info = POINTER_TOUCH_INFO {
            pointerInfo: POINTER_INFO {
                pointerType: PT_TOUCH,
                pointerId: contact.contact_id,
                pointerFlags: pointer_flags,
                ..Default::default()
            },
            touchFlags: TOUCH_FLAG_NONE,
            touchMask: TOUCH_MASK_CONTACTAREA | TOUCH_MASK_ORIENTATION | TOUCH_MASK_PRESSURE,
            orientation: ORIENTATION,
            pressure: PRESSURE,
            ..Default::default()
        };
        info.pointerInfo.ptPixelLocation.x = contact.x;
        info.pointerInfo.ptPixelLocation.y = contact.y;
        info.rcContact.left = contact.x - RADIUS;
        info.rcContact.right = contact.x + RADIUS;
        info.rcContact.top = contact.y - RADIUS;
        info.rcContact.bottom = contact.y + RADIUS;

        // SAFETY: `info` is a valid POINTER_TOUCH_INFO on the stack.
        unsafe {
            InjectTouchInput(&[info])
                .map_err(|e| InjectError::Failed(format!("InjectTouchInput failed: {e}")))?;
        }
        Ok(())
    }
}
