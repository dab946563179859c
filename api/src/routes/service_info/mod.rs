pub mod health_route;
pub mod platforms_route;
