mod health_handle;
mod history_handle;
mod location_handle;
mod reading_handle;
mod status_handle;

pub use health_handle::*;
pub use history_handle::*;
pub use location_handle::*;
pub use reading_handle::*;
pub use status_handle::*;
