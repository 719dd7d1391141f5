pub mod address_parser;
pub mod eircode;
pub mod prefix_table;
pub mod resolver;

pub use crate::domain::address::{Eircode, LookupOutcome, ResolvedAddress};
pub use crate::domain::ports::{ConfigProvider, FallbackGeocoder, PrimaryGeocoder};
pub use crate::utils::error::Result;
pub use resolver::EircodeResolver;
