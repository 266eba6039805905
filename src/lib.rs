pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;
pub mod workflow;
