// Domain entities
pub mod analysis;
pub mod config;
pub mod transaction;

pub use analysis::*;
pub use config::*;
pub use transaction::*;
