//! Shared test infrastructure
//!
//! ```rust
//! use crate::common::{fixtures, mock_service::MockDirectory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let directory = MockDirectory::start().await;
//!     directory.mount_list("/systemusers", fixtures::users(3), 100).await;
//!     let client = directory.client(100);
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod mock_service;

pub use mock_service::MockDirectory;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
