//! Directory service client
//!
//! [`JcClient`] owns the configuration and a pooled HTTP client. Each resource
//! kind adds its operations in its own `impl JcClient` block.

mod auth;
mod client;
mod command_results;
mod commands;
mod id_sources;
mod pagination;
mod radius_servers;
mod systems;
mod tags;
mod transport;
mod users;


pub use client::JcClient;
pub use transport::Op;
