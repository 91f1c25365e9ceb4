pub mod collect;
pub mod config;
pub mod dataset;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod plot;
pub mod xlsx;

pub use error::{PbpError, Result};
pub use model::*;
