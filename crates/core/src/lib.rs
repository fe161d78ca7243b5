pub mod config;
pub mod error;
pub mod palette;
pub mod types;

pub use config::AppConfig;
pub use error::{PulseError, PulseResult};
pub use palette::{ColorPalette, SourceColors};
pub use types::{AcquisitionSource, AgeGroup, EnrichedTransaction, TimeRange, Transaction};
