pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_resolver, PosApiClient};
pub use config::TomlConfig;
pub use crate::core::{eircode::parse as parse_eircode, EircodeResolver};
pub use domain::address::{AddressSource, Eircode, LookupOutcome, ResolvedAddress};
pub use utils::error::{PosError, Result};
