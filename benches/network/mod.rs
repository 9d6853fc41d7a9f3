pub mod application;
pub mod transport;
