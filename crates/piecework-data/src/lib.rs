pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_pieces, read_pieces};
