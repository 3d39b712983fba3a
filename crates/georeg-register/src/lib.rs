#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod correct;
pub use correct::*;

mod error;
pub use error::RegistrationError;

mod matcher;
pub use matcher::*;

mod pipeline;
pub use pipeline::*;

mod select;
pub use select::*;
