pub mod ctrl;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod graph;
pub mod sim;
pub mod topo;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
