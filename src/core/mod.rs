pub mod clock;
pub mod currency;
pub mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use currency::Currency;
pub use error::{AppError, Result};
