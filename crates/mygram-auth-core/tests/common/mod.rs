//! Common test utilities for mygram-auth-core integration tests

pub mod fixtures;
pub mod mock_lookup;

#[allow(unused_imports)]
pub use fixtures::{fast_config, register, test_services, TEST_SECRET};
#[allow(unused_imports)]
pub use mock_lookup::{FailingLookup, MockOwnerLookup};
