pub mod allocation;
pub mod analysis;
pub mod budget;
pub mod dashboard;
pub mod market;
pub mod order;
pub mod personal;
pub mod profile;
pub mod settings;
pub mod subscription;
