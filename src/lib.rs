pub mod aws;
pub mod common;
pub mod intake;
pub mod poller;
pub mod ports;
