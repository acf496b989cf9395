mod error;
mod recorder;
mod session;

pub use error::SessionError;
pub use recorder::{Recorder, DEFAULT_TICK};
pub use session::{RunMode, RunSession, RunStatus};
