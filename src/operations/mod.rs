//! Requests: typed commands, their preview and their execution

pub mod execute;
pub mod outcome;
pub mod preview;
pub mod request;

pub use outcome::Outcome;
pub use preview::render_preview;
pub use request::Request;
