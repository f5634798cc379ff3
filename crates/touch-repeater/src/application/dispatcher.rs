//! Route dispatch: prefix → sink-factory registration table.
//!
//! On connect the transport hands the request path to [`Dispatcher::open`].
//! The path is parsed into a [`Route`], its prefix is matched against the
//! registered entries in registration order, and the matching factory
//! builds the connection's forwarder from the argument table.  A path that
//! matches nothing, or a factory that rejects its arguments, fails the open;
//! the transport closes the connection and nothing is registered.
//!
//! New sinks register a `(prefix, factory)` pair; the dispatch logic never
//! changes.  [`SinkContext`] carries the state the standard factories
//! share: the process-wide frame counter, the display enumerator, the HID
//! device pool, and the per-connection device constructors.

use std::sync::Arc;

use thiserror::Error;

use touch_core::protocol::FrameCounter;

use crate::application::forwarder::{Forwarder, SinkError};
use crate::application::sinks::{
    ConsoleForwarder, HidForwarder, InjectForwarder, PointerForwarder, TuioForwarder,
};
use crate::domain::route::Route;
use crate::infrastructure::hid_device::{self, DevicePool};
use crate::infrastructure::pointer_device::PointerDevice;
use crate::infrastructure::screen_info::ScreenEnumerator;
use crate::infrastructure::touch_inject::TouchInjector;

/// Error type for connection-open dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered prefix matches the path.
    #[error("unsupported route: {path}")]
    UnknownRoute { path: String },

    /// The matching factory rejected the route's arguments.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Builds one forwarder from a parsed route.
pub type SinkFactory = Box<dyn Fn(&Route) -> Result<Box<dyn Forwarder>, SinkError> + Send + Sync>;

/// Constructs one pointer device per `/mouse` connection.
pub type PointerDeviceFactory =
    Arc<dyn Fn() -> Result<Box<dyn PointerDevice>, SinkError> + Send + Sync>;

/// Constructs one injector per `/win8` connection (capability check included).
pub type InjectorFactory =
    Arc<dyn Fn() -> Result<Box<dyn TouchInjector>, SinkError> + Send + Sync>;

/// Shared state injected into the standard sink factories.
pub struct SinkContext {
    /// Process-wide frame counter shared by every TUIO sink.
    pub frames: Arc<FrameCounter>,
    /// Display enumerator queried at sink construction.
    pub screens: Arc<dyn ScreenEnumerator>,
    /// Process-wide lease pool for the HID touchscreen device.
    pub hid_pool: Arc<DevicePool>,
    /// Per-connection pointer device constructor.
    pub pointer_devices: PointerDeviceFactory,
    /// Per-connection touch injector constructor.
    pub injectors: InjectorFactory,
}

/// The prefix → factory registration table.
#[derive(Default)]
pub struct Dispatcher {
    routes: Vec<(&'static str, SinkFactory)>,
}

impl Dispatcher {
    /// An empty table; sinks are added with [`register`](Self::register).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for a route prefix.
    ///
    /// Prefixes are matched in registration order against the lower-cased
    /// path, so register the more specific of two overlapping prefixes
    /// first.
    pub fn register(&mut self, prefix: &'static str, factory: SinkFactory) {
        self.routes.push((prefix, factory));
    }

    /// Opens a connection: parses the path and builds its forwarder.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownRoute`] when no prefix matches and
    /// the factory's [`SinkError`] when argument validation fails.  Either
    /// way nothing was registered and the caller must close the connection.
    pub fn open(&self, raw_path: &str) -> Result<Box<dyn Forwarder>, DispatchError> {
        let route = Route::parse(raw_path);
        for (prefix, factory) in &self.routes {
            if route.path.starts_with(prefix) {
                return Ok(factory(&route)?);
            }
        }
        Err(DispatchError::UnknownRoute { path: route.path })
    }

    /// The registered prefixes, in match order.
    pub fn prefixes(&self) -> Vec<&'static str> {
        self.routes.iter().map(|(prefix, _)| *prefix).collect()
    }
}

/// Builds the standard route table over the given context.
pub fn standard_routes(context: Arc<SinkContext>) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();

    let frames = Arc::clone(&context.frames);
    dispatcher.register(
        "/tuio",
        Box::new(move |route| {
            Ok(Box::new(TuioForwarder::from_route(route, Arc::clone(&frames))) as _)
        }),
    );

    dispatcher.register(
        "/console",
        Box::new(|_route| Ok(Box::new(ConsoleForwarder::new()) as _)),
    );

    let ctx = Arc::clone(&context);
    dispatcher.register(
        "/win7",
        Box::new(move |route| {
            Ok(Box::new(HidForwarder::from_route(
                route,
                ctx.screens.as_ref(),
                &ctx.hid_pool,
            )?) as _)
        }),
    );

    let ctx = Arc::clone(&context);
    dispatcher.register(
        "/win8",
        Box::new(move |route| {
            let injector = (ctx.injectors)()?;
            Ok(Box::new(InjectForwarder::from_route(
                route,
                ctx.screens.as_ref(),
                injector,
            )?) as _)
        }),
    );

    let ctx = Arc::clone(&context);
    dispatcher.register(
        "/mouse",
        Box::new(move |route| {
            let device = (ctx.pointer_devices)()?;
            Ok(Box::new(PointerForwarder::from_route(
                route,
                ctx.screens.as_ref(),
                device,
            )?) as _)
        }),
    );

    dispatcher
}

/// The context wired to this platform's real devices.
///
/// On Windows every sink is live.  Elsewhere `/console` and `/tuio` work
/// normally while the screen-bound sinks fail construction with a typed
/// platform error, mirroring the capability checks the original Windows
/// drivers perform.
pub fn native_context() -> Arc<SinkContext> {
    #[cfg(target_os = "windows")]
    {
        use crate::infrastructure::pointer_device::NativePointerDevice;
        use crate::infrastructure::screen_info::NativeScreenEnumerator;
        use crate::infrastructure::touch_inject::windows::WindowsTouchInjector;

        Arc::new(SinkContext {
            frames: Arc::new(FrameCounter::new()),
            screens: Arc::new(NativeScreenEnumerator::new()),
            hid_pool: Arc::new(hid_device::native_pool()),
            pointer_devices: Arc::new(|| Ok(Box::new(NativePointerDevice::new()) as _)),
            injectors: Arc::new(|| {
                WindowsTouchInjector::initialize()
                    .map(|injector| Box::new(injector) as _)
                    .map_err(|e| SinkError::InjectionUnsupported(e.to_string()))
            }),
        })
    }
    #[cfg(not(target_os = "windows"))]
    {
        use crate::infrastructure::screen_info::MockScreenEnumerator;

        Arc::new(SinkContext {
            frames: Arc::new(FrameCounter::new()),
            screens: Arc::new(MockScreenEnumerator::headless()),
            hid_pool: Arc::new(hid_device::native_pool()),
            pointer_devices: Arc::new(|| Err(SinkError::PlatformUnsupported("mouse"))),
            injectors: Arc::new(|| Err(SinkError::PlatformUnsupported("touch injection"))),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
