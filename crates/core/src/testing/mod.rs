//! Testing utilities and mock implementations.
//!
//! Lets the server and its tests run the priority advisor without a real
//! model endpoint.

mod mock_llm;

pub use mock_llm::MockLlmClient;
