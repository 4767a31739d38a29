pub mod admin_ride_routes;
pub mod driver_ride_routes;
pub mod ride_routes;
