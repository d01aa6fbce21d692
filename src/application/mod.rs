//! Application layer - services, DTOs, and ports

pub mod dto;
pub mod ports;
pub mod services;
