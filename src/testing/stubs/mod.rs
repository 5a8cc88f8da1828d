pub mod counting_rng;

pub use counting_rng::CountingRng;
