pub mod health;
pub mod metrics;
pub mod registry;
pub mod remote_state;
pub mod root;

pub use registry::{API_PREFIX, RegisterRoute, RouteInfo, RouteRegistry};
