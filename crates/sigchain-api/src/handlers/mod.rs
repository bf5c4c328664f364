//! Request handlers

pub mod devices;
pub mod health;
pub mod signatures;
