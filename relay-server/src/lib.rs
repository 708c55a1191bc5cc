pub mod app;
pub mod error;
pub mod export;
pub mod routes;
pub mod settings;
pub mod shutdown;
pub mod state;
pub mod telemetry;
pub mod workflow;
