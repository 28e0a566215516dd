//! Library surface of the daybrief server binary, exposed so integration
//! tests can drive the real router without a live listener.

pub mod cli;
pub mod config;
pub mod http;
