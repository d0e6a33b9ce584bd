pub mod batch;
pub mod core;
pub mod reads;
pub mod writes;


pub use batch::{AppData, BatchOutcome, BatchRequest};
pub use self::core::{DataManager, DataManagerConfig};
pub use reads::SelectResult;
