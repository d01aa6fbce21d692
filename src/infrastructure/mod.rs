//! Infrastructure layer - persistence, queues, HTTP, and outbound adapters

pub mod config;
pub mod http;
pub mod mailer;
pub mod persistence;
pub mod queues;
pub mod state;
pub mod workers;
