mod error;
mod types;

pub use error::{EventError, Result};
pub use types::{parse_live_event, BookAction, LiveEvent};
