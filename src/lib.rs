//! Finalize the declared entry points of a staged package into commands a
//! runtime can invoke directly, generating shell wrappers where the runtime's
//! command grammar cannot express the resolved command.
pub mod command;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod locator;
pub mod normalize;
pub mod prime;
pub mod probe;
pub mod resolve;
pub mod shebang;
pub mod wrapper;

#[cfg(test)]
mod test_support;

pub use command::AppCommand;
pub use context::PrimeContext;
pub use error::PrimeError;
