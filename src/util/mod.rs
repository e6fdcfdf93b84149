pub mod clock;
pub mod tracing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use self::tracing::init_tracing;
