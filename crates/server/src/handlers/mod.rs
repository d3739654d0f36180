pub mod health;
pub mod metrics;
pub mod remote_state;
