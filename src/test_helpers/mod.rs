// Test Helpers Module - Test Doubles for the Storage Boundaries
//
// Scripted implementations of the search and key-value traits used by unit tests
// inside the crate and, through the `test-utils` feature, by the integration tests
// under tests/.

pub mod failing_store;
pub mod mock_search_backend;

pub use failing_store::FailingKeyValueStore;
pub use mock_search_backend::MockSearchBackend;
