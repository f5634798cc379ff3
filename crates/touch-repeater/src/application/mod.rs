//! Application layer: the forwarder contract, the sink implementations,
//! and the connection dispatch/registry logic that binds them together.

pub mod dispatcher;
pub mod forwarder;
pub mod registry;
pub mod sinks;

pub use dispatcher::{native_context, standard_routes, DispatchError, Dispatcher, SinkContext};
pub use forwarder::{ForwardError, Forwarder, SinkError};
pub use registry::{ConnectionId, ForwarderRegistry};
