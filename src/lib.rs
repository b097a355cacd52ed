pub mod config;
pub mod plantnet;
pub mod routes;
