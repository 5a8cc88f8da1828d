mod build;
mod choices;
mod schema;

pub use build::{BuildError, choose};
pub use choices::*;
pub use schema::{accepted_params, retain_accepted};
