pub mod admin;
pub mod health;
pub mod tracking;

pub use admin::admin_routes;
pub use health::{AppStartTime, HealthService, health_routes};
pub use tracking::{TrackingRedirect, tracking_routes};
