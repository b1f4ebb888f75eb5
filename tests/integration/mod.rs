//! Integration tests for jcapi
//!
//! Each test drives the public client or CLI entry points against a mock
//! directory service and checks both the result and the traffic.

pub mod auth_tests;
pub mod csv_import_tests;
pub mod maintenance_tests;
pub mod pagination_tests;
pub mod save_tests;
