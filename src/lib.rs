pub mod acknowledgement;
pub mod api;
pub mod config;
pub mod confirm;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod polling;
pub mod screens;
pub mod session;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;
