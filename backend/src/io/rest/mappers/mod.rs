//! Conversions between domain models and the `shared` DTOs.

pub mod dashboard_mapper;
pub mod finance_mapper;
pub mod maintenance_mapper;
pub mod notification_mapper;
pub mod quality_mapper;
pub mod visit_mapper;
