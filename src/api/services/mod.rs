pub mod health;
pub mod ip_locations;

pub use health::{AppStartTime, HealthResponse, HealthService, health_routes};
pub use ip_locations::{IpLocationsService, IpQuery, ip_locations_routes};
