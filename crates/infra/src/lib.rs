//! Infrastructure layer: command registry implementations and configuration.

pub mod command_registry;
pub mod config;

mod integration_tests;

pub use command_registry::{CommandRegistry, InMemoryCommandRegistry};
pub use config::{ConfigError, RegistryConfig};
