//! Hypixel SkyBlock bazaar adapter.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::HypixelClient;
pub use settings::{HypixelConfig, HypixelHttpConfig};
