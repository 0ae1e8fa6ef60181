//! API route handlers

pub mod health;
pub mod interfaces;
pub mod speed;
pub mod url;
