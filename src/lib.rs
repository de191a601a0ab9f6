pub mod configuration;
pub mod dashboard;
pub mod display_state;
pub mod error_fmt;
pub mod fee_distribution;
pub mod input;
pub mod layout;
pub mod mempool_client;
pub mod mempool_manager;
pub mod startup;
pub mod telemetry;
