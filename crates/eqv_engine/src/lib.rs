pub mod error;
pub mod fixed_point;
pub mod pass;
pub mod passes;

mod normalizer;


pub use error::{EngineError, Error};
pub use fixed_point::{fixed_point, Limits};
pub use normalizer::{equivalent, normalize, NormalizeStep, Normalizer};
pub use pass::Pass;
