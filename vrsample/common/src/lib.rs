pub mod logging;

pub use anyhow;
pub use log;
pub use parking_lot;

pub use log::{debug, error, info, warn};
pub use logging::*;
