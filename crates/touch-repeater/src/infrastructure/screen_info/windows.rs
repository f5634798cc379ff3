//! Windows display enumeration via `EnumDisplayMonitors` / `GetMonitorInfoW`.

#![cfg(target_os = "windows")]

use touch_core::display::{DisplayInfo, Rect};
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW,
};

use super::{ScreenEnumerator, ScreenInfoError};

/// Windows implementation of [`ScreenEnumerator`] using Win32 APIs.
pub struct WindowsScreenEnumerator;

impl WindowsScreenEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsScreenEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenEnumerator for WindowsScreenEnumerator {
    fn query_displays(&self) -> Result<Vec<DisplayInfo>, ScreenInfoError> {
        let mut displays: Vec<DisplayInfo> = Vec::new();

        // SAFETY: `monitor_enum_proc` has the signature Win32 expects and
        // `lparam` points at `displays`, which outlives the synchronous
        // enumeration call.  A null HDC enumerates the whole virtual desktop.
        unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut displays as *mut Vec<DisplayInfo> as isize),
            );
        }

        if displays.is_empty() {
            return Err(ScreenInfoError::Platform(
                "EnumDisplayMonitors returned no monitors".to_string(),
            ));
        }

        for (index, display) in displays.iter_mut().enumerate() {
            display.index = index;
        }

        Ok(displays)
    }
}

fn rect_from_native(rect: &RECT) -> Rect {
    Rect::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    )
}

/// Win32 monitor enumeration callback.
///
/// # Safety
///
/// Called by Win32 inside `EnumDisplayMonitors`; `lparam` must point at a
/// `Vec<DisplayInfo>` valid for the duration of the enumeration call.
unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let displays = &mut *(lparam.0 as *mut Vec<DisplayInfo>);

    // SAFETY: MONITORINFOEXW is plain data; zero initialization is valid.
    let mut info: MONITORINFOEXW = std::mem::zeroed();
    info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: `hmonitor` is a valid handle provided by Win32.
    if GetMonitorInfoW(hmonitor, &mut info.monitorInfo).as_bool() {
        let device_name = String::from_utf16_lossy(&info.szDevice)
            .trim_end_matches('\0')
            .to_string();

        displays.push(DisplayInfo {
            index: 0, // assigned after enumeration
            device_name,
            monitor: rect_from_native(&info.monitorInfo.rcMonitor),
            work_area: rect_from_native(&info.monitorInfo.rcWork),
        });
    }

    BOOL(1) // continue enumeration
}
