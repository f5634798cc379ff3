//! Windows pointer injection via `SetCursorPos` and `SendInput`.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEINPUT,
};
use windows::Win32::UI::WindowsAndMessaging::SetCursorPos;

use super::{PointerDevice, PointerError};

/// Windows implementation of [`PointerDevice`].
///
/// The cursor is positioned with `SetCursorPos` (absolute pixel
/// coordinates across the virtual desktop); button transitions go through
/// `SendInput` at the current cursor position.
pub struct WindowsPointerDevice;

impl WindowsPointerDevice {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsPointerDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn send_button(flags: windows::Win32::UI::Input::KeyboardAndMouse::MOUSE_EVENT_FLAGS) {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    // SAFETY: `input` is a valid INPUT structure on the stack.
    unsafe {
        SendInput(&[input], std::mem::size_of::<INPUT>() as i32);
    }
}

impl PointerDevice for WindowsPointerDevice {
    fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError> {
        // SAFETY: SetCursorPos takes plain pixel coordinates; no pointers.
        unsafe {
            SetCursorPos(x, y)
                .map_err(|e| PointerError::Platform(format!("SetCursorPos failed: {e}")))?;
        }
        Ok(())
    }

    fn press(&self, _x: i32, _y: i32) -> Result<(), PointerError> {
        send_button(MOUSEEVENTF_LEFTDOWN);
        Ok(())
    }

    fn release(&self, _x: i32, _y: i32) -> Result<(), PointerError> {
        send_button(MOUSEEVENTF_LEFTUP);
        Ok(())
    }
}
