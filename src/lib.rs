pub mod configuration;
pub mod connection;
pub mod db;
pub mod forms;
mod helpers;
mod middleware;
pub mod models;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod views;
