/// Things that can go wrong in the API
pub mod error;
pub use error::{Error, Result};

/// The registration endpoint's request and response bodies
pub mod register;

/// Client for the registration API
pub mod client;
pub use client::Client;
