pub mod config;
pub mod domain;
pub mod routes;
pub mod startup;
pub mod store;
pub mod subscription;
pub mod telemetry;
pub mod views;
