pub mod loader;
pub mod types;

pub use loader::{load_dataset, parse_dataset};
pub use types::{Record, RecordStore};
