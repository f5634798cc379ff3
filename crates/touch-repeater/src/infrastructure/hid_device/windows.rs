//! Windows HID touchscreen device: discovery, open, and report writes.
//!
//! The driver registers a HID device with vendor id `0xDDDD` and product id
//! `0x0001`.  Discovery walks the HID device-interface set via the SetupDi
//! APIs, opens each candidate path, and keeps the first handle whose
//! attributes match.  Personal/non-commercial projects can use the
//! compatible UniSoftHID driver.

#![cfg(target_os = "windows")]

use touch_core::protocol::hid_report::TouchReport;
use windows::core::PCWSTR;
use windows::Win32::Devices::DeviceAndDriverInstallation::{
    SetupDiDestroyDeviceInfoList, SetupDiEnumDeviceInterfaces, SetupDiGetClassDevsW,
    SetupDiGetDeviceInterfaceDetailW, DIGCF_DEVICEINTERFACE, DIGCF_PRESENT, HDEVINFO,
    SP_DEVICE_INTERFACE_DATA, SP_DEVICE_INTERFACE_DETAIL_DATA_W,
};
use windows::Win32::Devices::HumanInterfaceDevice::{HidD_GetAttributes, HidD_GetHidGuid, HIDD_ATTRIBUTES};
use windows::Win32::Foundation::{CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, WriteFile, FILE_FLAGS_AND_ATTRIBUTES, FILE_SHARE_READ, FILE_SHARE_WRITE,
    OPEN_EXISTING,
};

use super::{DeviceError, ReportDevice};

/// Vendor id the touchscreen driver registers with.
const VENDOR_ID: u16 = 0xDDDD;
/// Product id the touchscreen driver registers with.
const PRODUCT_ID: u16 = 0x0001;

/// An open handle to the touchscreen HID device.
///
/// Closed in `Drop`; the [`DevicePool`](super::DevicePool) guarantees that
/// happens exactly once, when the last lease is released.
pub struct WindowsHidDevice {
    handle: HANDLE,
}

// SAFETY: the raw HANDLE is only used through &mut self (writes) and Drop;
// the pool serializes both behind its mutex.
unsafe impl Send for WindowsHidDevice {}

impl WindowsHidDevice {
    /// Finds and opens the touchscreen device.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] when no attached HID interface
    /// matches the driver's vendor/product ids, or [`DeviceError::Open`]
    /// when the device-interface set cannot be enumerated.
    pub fn open() -> Result<WindowsHidDevice, DeviceError> {
        // SAFETY: HidD_GetHidGuid only writes its out-parameter.
        let hid_guid = unsafe { HidD_GetHidGuid() };

        // SAFETY: a class GUID obtained above; the returned set is released
        // below via SetupDiDestroyDeviceInfoList in every path.
        let device_set: HDEVINFO = unsafe {
            SetupDiGetClassDevsW(
                Some(&hid_guid),
                PCWSTR::null(),
                None,
                DIGCF_PRESENT | DIGCF_DEVICEINTERFACE,
            )
        }
        .map_err(|e| DeviceError::Open(format!("SetupDiGetClassDevsW failed: {e}")))?;

        let result = Self::open_matching_interface(device_set, &hid_guid);

        // SAFETY: `device_set` came from SetupDiGetClassDevsW above.
        unsafe {
            let _ = SetupDiDestroyDeviceInfoList(device_set);
        }

        result
    }

    /// Walks the interface set and opens the first matching device.
    fn open_matching_interface(
        device_set: HDEVINFO,
        hid_guid: &windows::core::GUID,
    ) -> Result<WindowsHidDevice, DeviceError> {
        let mut index = 0u32;
        loop {
            let mut interface_data = SP_DEVICE_INTERFACE_DATA {
                cbSize: std::mem::size_of::<SP_DEVICE_INTERFACE_DATA>() as u32,
                ..Default::default()
            };

            // SAFETY: `device_set` is a live set; `interface_data` is sized.
            let enumerated = unsafe {
                SetupDiEnumDeviceInterfaces(device_set, None, hid_guid, index, &mut interface_data)
            };
            if enumerated.is_err() {
                // Index exhausted: no matching device on the system.
                return Err(DeviceError::NotFound(
                    "touchscreen HID driver was not found".to_string(),
                ));
            }
            index += 1;

            if let Some(device) = Self::try_open_interface(device_set, &interface_data) {
                return Ok(device);
            }
        }
    }

    /// Opens one interface and keeps it if the vendor/product ids match.
    fn try_open_interface(
        device_set: HDEVINFO,
        interface_data: &SP_DEVICE_INTERFACE_DATA,
    ) -> Option<WindowsHidDevice> {
        // The detail struct is variable-length: a fixed header followed by
        // the NUL-terminated device path.  A fixed buffer large enough for
        // any real path avoids the two-call size dance.
        const DETAIL_BUFFER_SIZE: usize = 1024;
        let mut detail_buffer = [0u8; DETAIL_BUFFER_SIZE];
        let detail = detail_buffer.as_mut_ptr() as *mut SP_DEVICE_INTERFACE_DETAIL_DATA_W;
        // SAFETY: the buffer is larger than the fixed header; cbSize must be
        // the header size, not the buffer size.
        unsafe {
            (*detail).cbSize = std::mem::size_of::<SP_DEVICE_INTERFACE_DETAIL_DATA_W>() as u32;
        }

        // SAFETY: all pointers reference live stack storage.
        let detailed = unsafe {
            SetupDiGetDeviceInterfaceDetailW(
                device_set,
                interface_data,
                Some(detail),
                DETAIL_BUFFER_SIZE as u32,
                None,
                None,
            )
        };
        if detailed.is_err() {
            return None;
        }

        // SAFETY: DevicePath is the NUL-terminated path written above.
        let path = unsafe { PCWSTR::from_raw((*detail).DevicePath.as_ptr()) };

        // SAFETY: `path` points into `detail_buffer`, which outlives the call.
        let handle = unsafe {
            CreateFileW(
                path,
                GENERIC_READ.0 | GENERIC_WRITE.0,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                None,
                OPEN_EXISTING,
                FILE_FLAGS_AND_ATTRIBUTES(0),
                None,
            )
        }
        .ok()?;

        let mut attributes = HIDD_ATTRIBUTES {
            Size: std::mem::size_of::<HIDD_ATTRIBUTES>() as u32,
            ..Default::default()
        };
        // SAFETY: `handle` is a live HID handle; `attributes` is sized.
        let matched = unsafe { HidD_GetAttributes(handle, &mut attributes) }.as_bool()
            && attributes.VendorID == VENDOR_ID
            && attributes.ProductID == PRODUCT_ID;

        if matched {
            Some(WindowsHidDevice { handle })
        } else {
            // SAFETY: `handle` came from CreateFileW above.
            unsafe {
                let _ = CloseHandle(handle);
            }
            None
        }
    }
}

impl ReportDevice for WindowsHidDevice {
    fn write_report(&mut self, report: &TouchReport) -> Result<(), DeviceError> {
        let buffer = report.as_device_buffer();
        let mut written = 0u32;
        // SAFETY: `buffer` and `written` live across the synchronous call.
        unsafe {
            WriteFile(self.handle, Some(&buffer), Some(&mut written), None)
                .map_err(|e| DeviceError::Write(format!("WriteFile failed: {e}")))?;
        }
        if written as usize != buffer.len() {
            return Err(DeviceError::Write(format!(
                "short write: {written} of {} bytes",
                buffer.len()
            )));
        }
        Ok(())
    }
}

impl Drop for WindowsHidDevice {
    fn drop(&mut self) {
        // SAFETY: `handle` is owned by this struct and closed exactly once.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}
