//! Wire-format data models for the upstream services

pub mod chat;
pub mod location;
pub mod ocr;
