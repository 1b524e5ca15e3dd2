pub mod operation;
pub mod relay_service;
