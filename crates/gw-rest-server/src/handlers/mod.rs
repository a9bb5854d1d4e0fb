//! Request handlers

pub mod commits;
pub mod health;
pub mod status;
pub mod sync;
