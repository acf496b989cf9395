mod error;
mod parser;

pub use error::TrackError;
pub use parser::Track;
