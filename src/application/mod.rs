//! Application layer - Ports, use case services and DTOs

pub mod dto;
pub mod ports;
pub mod services;
