pub mod analysis;
pub mod config;
pub mod error;
pub mod fetch;
pub mod resource;

#[cfg(test)]
mod test_utils;

pub use config::CheckerConfig;
pub use error::{Error, ErrorKind, FetchError, Result};
pub use resource::ResourceRequest;
