pub mod batching;
pub mod optim;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
