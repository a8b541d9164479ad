pub mod api;
pub mod config;
pub mod database;
pub mod domain;
pub mod entities;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod migrator;
pub mod repository;
pub mod telemetry;
pub mod views;

pub use sea_orm;
