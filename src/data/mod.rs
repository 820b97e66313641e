//! Data module - CSV loading, typed rows and aggregation

mod loader;
mod model;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use model::{Dataset, Observation, YearMax};
pub use processor::{DataProcessor, DerivedViews, ProcessorError, ANIMATION_YEARS};
