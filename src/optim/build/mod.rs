mod error;
mod minibatches;
mod optimizers;

pub use error::BuildError;
pub use optimizers::choose;
