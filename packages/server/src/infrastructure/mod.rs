//! Infrastructure layer: store implementations, wire DTOs, and the
//! HTTP push sender.

pub mod dto;
pub mod push;
pub mod repository;
