//! Core application modules
//!
//! This module contains configuration, constants, logging, the provider
//! abstraction, and the upstream service clients.

pub mod config;
pub mod constants;
pub mod logging;
pub mod ocr;
pub mod provider;
pub mod providers;
