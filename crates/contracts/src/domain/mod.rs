pub mod common;

pub mod a001_service_category;
pub mod a002_client;
pub mod a003_service;
pub mod a004_product;
pub mod a005_purchase;
pub mod a006_sale;
pub mod a007_expense;
pub mod a008_employee;
pub mod a009_audit_log;
pub mod a010_report;
