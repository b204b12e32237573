mod location;
mod reading;
mod summary;

pub use location::Location;
pub use reading::{HistorySample, Measurements, Reading, UnitStatus};
pub use summary::StatusSummary;
