//! Ports (interfaces) defining the boundaries of the driver
//!
//! - **LoadCellPort**: how the application takes weight samples (HX711, mock)

pub mod load_cell;

pub use load_cell::{LoadCellConfig, LoadCellError, LoadCellPort};
