//! Cross-crate scenarios.

pub mod authorization_flow;
pub mod crypto_scenarios;
pub mod frame_scenarios;
pub mod uri_scenarios;
