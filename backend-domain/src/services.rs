// Domain services: the scoring pipeline and the reference sampler
pub mod features;
pub mod isolation_forest;
pub mod reasons;
pub mod rules;
pub mod sampler;
pub mod scorer;
pub mod summary;

pub use features::*;
pub use isolation_forest::*;
pub use reasons::*;
pub use rules::*;
pub use sampler::*;
pub use scorer::*;
pub use summary::*;
