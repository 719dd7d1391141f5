#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, CustomerCommand, CustomerForm};
pub use toml_config::TomlConfig;
