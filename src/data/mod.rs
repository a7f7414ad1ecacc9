//! Data module - CSV loading and cleaning

mod cleaner;
mod error;
mod loader;
pub mod table;

pub use error::DataError;
pub use loader::DataLoader;
pub use table::{LaptopTable, RawLaptopTable};
