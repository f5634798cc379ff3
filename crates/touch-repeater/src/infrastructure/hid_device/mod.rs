//! Touchscreen report device and its process-wide lease pool.
//!
//! The legacy HID touchscreen driver exposes exactly one device, shared by
//! every `/win7` connection in the process.  [`DevicePool`] owns that
//! singleton: the first `acquire` opens the device lazily, later acquires
//! lease the same handle, and the device closes when the last lease is
//! dropped.  Leases are plain `Arc`s, so the reference counting that the
//! lifecycle depends on is the ordinary `Arc` count; there is no separate
//! counter to keep in sync.
//!
//! Writes go through [`SharedReportDevice`], which serializes them behind a
//! mutex: two connections forwarding concurrently can never interleave the
//! bytes of two reports.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use thiserror::Error;
use touch_core::protocol::hid_report::TouchReport;

/// Error type for report device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No matching device is attached, or the platform has no driver.
    #[error("device not found: {0}")]
    NotFound(String),

    /// The device exists but could not be opened.
    #[error("device open failed: {0}")]
    Open(String),

    /// A report write failed.
    #[error("device write failed: {0}")]
    Write(String),
}

/// Trait for writing touch reports to the driver.
///
/// Implementations close the device in `Drop`.
pub trait ReportDevice: Send {
    /// Writes one encoded report.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Write`] if the device rejects the report.
    fn write_report(&mut self, report: &TouchReport) -> Result<(), DeviceError>;
}

/// The shared, write-serialized device handle leased out by the pool.
pub struct SharedReportDevice {
    inner: Mutex<Box<dyn ReportDevice>>,
}

impl SharedReportDevice {
    fn new(device: Box<dyn ReportDevice>) -> Self {
        Self {
            inner: Mutex::new(device),
        }
    }

    /// Writes one report, excluding all concurrent writers for the duration.
    ///
    /// # Errors
    ///
    /// Propagates the device's write error.
    pub fn write(&self, report: &TouchReport) -> Result<(), DeviceError> {
        // A poisoned lock still holds a usable handle; the device has no
        // invariant a panicked writer could have broken mid-write.
        let mut device = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        device.write_report(report)
    }
}

/// Opens the underlying device; called at most once per open/close cycle.
pub type DeviceOpener = Box<dyn Fn() -> Result<Box<dyn ReportDevice>, DeviceError> + Send + Sync>;

/// Process-wide lease pool for the singleton report device.
pub struct DevicePool {
    opener: DeviceOpener,
    slot: Mutex<Weak<SharedReportDevice>>,
}

impl DevicePool {
    /// Creates a pool around a device opener.
    pub fn new(opener: DeviceOpener) -> Self {
        Self {
            opener,
            slot: Mutex::new(Weak::new()),
        }
    }

    /// Leases the shared device, opening it on the first acquire.
    ///
    /// The slot lock is held across the open so two connections racing on
    /// first acquire cannot open the device twice.
    ///
    /// # Errors
    ///
    /// Propagates the opener's error; the pool stays empty, so a later
    /// acquire retries the open.
    pub fn acquire(&self) -> Result<Arc<SharedReportDevice>, DeviceError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(device) = slot.upgrade() {
            return Ok(device);
        }
        let device = Arc::new(SharedReportDevice::new((self.opener)()?));
        *slot = Arc::downgrade(&device);
        Ok(device)
    }

    /// Number of outstanding leases (diagnostics only).
    pub fn lease_count(&self) -> usize {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .strong_count()
    }
}

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

/// The pool wired to the platform's real driver.
///
/// On non-Windows hosts the opener always fails: the legacy touchscreen
/// driver only exists on Windows, so `/win7` connections are rejected at
/// construction time.
pub fn native_pool() -> DevicePool {
    #[cfg(target_os = "windows")]
    {
        DevicePool::new(Box::new(|| {
            self::windows::WindowsHidDevice::open()
                .map(|device| Box::new(device) as Box<dyn ReportDevice>)
        }))
    }
    #[cfg(not(target_os = "windows"))]
    {
        DevicePool::new(Box::new(|| {
            Err(DeviceError::NotFound(
                "the touchscreen HID driver is only available on Windows".to_string(),
            ))
        }))
    }
}

// ── Mock implementation (always compiled for tests) ───────────────────────────

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared observation point for [`MockReportDevice`] instances.
///
/// Lets a test watch opens, writes, and the close of a device whose
/// ownership has moved into the pool.
#[derive(Default)]
pub struct MockDeviceState {
    /// Number of times the opener produced a device.
    pub opens: AtomicUsize,
    /// Every report written, in write order.
    pub writes: Mutex<Vec<TouchReport>>,
    /// Set when the device is dropped (closed).
    pub closed: AtomicBool,
}

/// A mock report device that records writes and flags its own close.
pub struct MockReportDevice {
    state: Arc<MockDeviceState>,
    /// When `true`, every write returns a [`DeviceError::Write`].
    pub should_fail: bool,
}

impl MockReportDevice {
    pub fn new(state: Arc<MockDeviceState>) -> Self {
        state.opens.fetch_add(1, Ordering::SeqCst);
        Self {
            state,
            should_fail: false,
        }
    }

    /// A pool whose opener hands out mock devices against `state`.
    pub fn pool(state: Arc<MockDeviceState>) -> DevicePool {
        DevicePool::new(Box::new(move || {
            Ok(Box::new(MockReportDevice::new(Arc::clone(&state))) as Box<dyn ReportDevice>)
        }))
    }
}

impl ReportDevice for MockReportDevice {
    fn write_report(&mut self, report: &TouchReport) -> Result<(), DeviceError> {
        if self.should_fail {
            return Err(DeviceError::Write("mock failure".to_string()));
        }
        self.state
            .writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }
}

impl Drop for MockReportDevice {
    fn drop(&mut self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
