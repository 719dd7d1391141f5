// Domain layer: address types, provider payloads, backend DTOs and ports.

pub mod address;
pub mod geocoding;
pub mod model;
pub mod ports;
