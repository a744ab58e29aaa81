pub mod allocation_service;
pub mod budget_service;
pub mod order_service;
pub mod subscription_service;
