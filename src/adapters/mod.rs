// Adapters layer: concrete service implementations and the local mock dataset.

pub mod http;
pub mod memory;
pub mod mock;

pub use http::HttpService;
pub use memory::InMemoryService;
pub use mock::MockDataset;
