// src/lib.rs

//! deck-scout Library

pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;
