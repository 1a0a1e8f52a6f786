pub mod connector;
pub mod error;
pub mod state;

pub use connector::Connector;
pub use error::{Error, ErrorResponse};
pub use state::create_state;
