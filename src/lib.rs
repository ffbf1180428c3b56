pub mod capture;
pub mod codec;
pub mod config;
pub mod core;
pub mod observability;
pub mod sinks;
pub mod transport;
