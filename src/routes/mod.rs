pub mod index_routes;
pub mod system_routes;
pub mod timestamp_routes;
