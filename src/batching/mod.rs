mod error;
mod extent;
mod partition;
mod stream;

pub use error::BatchingError;
pub use extent::Extent;
pub use partition::partition;
pub use stream::MinibatchStream;
