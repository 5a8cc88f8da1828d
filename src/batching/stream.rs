use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::batching::{BatchingError, Extent, partition};

/// Unbounded source of minibatch extents for stochastic training loops.
///
/// Each pull returns one [`Extent`] from the partition of `[0, n_samples)`
/// into `batch_size`-row batches. Without replacement the stream walks the
/// whole partition in a shuffled order and reshuffles every time a pass
/// completes, so each pass (an epoch) yields every batch exactly once. With
/// replacement every pull is an independent uniform draw over the partition.
///
/// The stream never ends on its own; dropping it is the only way to stop
/// it. Each instance owns its shuffle order and cursor exclusively, so
/// separately constructed streams over the same configuration never
/// interfere. One consumer per instance; wrap pulls in external
/// synchronization if several threads must share one.
#[derive(Debug)]
pub struct MinibatchStream<R: Rng = StdRng> {
    extents: Vec<Extent>,
    rng: R,
    draw: DrawMode,
}

#[derive(Debug)]
enum DrawMode {
    /// Shuffled full passes; reshuffled whenever the cursor runs out.
    Epochs { order: Vec<usize>, cursor: usize },
    /// Independent uniform draws, no epoch bookkeeping.
    Replacement,
}

impl MinibatchStream<StdRng> {
    /// Stream seeded from OS entropy.
    pub fn new(
        n_samples: usize,
        batch_size: usize,
        with_replacement: bool,
    ) -> Result<Self, BatchingError> {
        Self::with_rng(n_samples, batch_size, with_replacement, StdRng::from_os_rng())
    }

    /// Deterministic stream: the same seed reproduces the same draw sequence.
    pub fn seeded(
        n_samples: usize,
        batch_size: usize,
        with_replacement: bool,
        seed: u64,
    ) -> Result<Self, BatchingError> {
        Self::with_rng(
            n_samples,
            batch_size,
            with_replacement,
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> MinibatchStream<R> {
    /// Builds a stream drawing all of its randomness from `rng`.
    ///
    /// The partition is materialized eagerly and a misconfiguration fails
    /// here rather than at some later pull: `batch_size == 0` is rejected by
    /// [`partition`], and zero samples are rejected in both replacement
    /// modes since an endless stream over an empty partition cannot produce
    /// anything.
    pub fn with_rng(
        n_samples: usize,
        batch_size: usize,
        with_replacement: bool,
        mut rng: R,
    ) -> Result<Self, BatchingError> {
        let extents = partition(n_samples, batch_size)?;
        if extents.is_empty() {
            return Err(BatchingError::InvalidConfiguration(
                "cannot stream minibatches over zero samples".into(),
            ));
        }

        let draw = if with_replacement {
            DrawMode::Replacement
        } else {
            let mut order: Vec<usize> = (0..extents.len()).collect();
            order.shuffle(&mut rng);
            DrawMode::Epochs { order, cursor: 0 }
        };

        Ok(Self { extents, rng, draw })
    }

    /// Produces the next extent. Never exhausts.
    pub fn next_extent(&mut self) -> Extent {
        match &mut self.draw {
            DrawMode::Replacement => {
                // extents is non-empty by construction
                let i = self.rng.random_range(0..self.extents.len());
                self.extents[i]
            }
            DrawMode::Epochs { order, cursor } => {
                if *cursor == order.len() {
                    order.shuffle(&mut self.rng);
                    *cursor = 0;
                }
                let extent = self.extents[order[*cursor]];
                *cursor += 1;
                extent
            }
        }
    }

    /// The materialized partition the stream draws from, in index order.
    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    pub fn with_replacement(&self) -> bool {
        matches!(self.draw, DrawMode::Replacement)
    }
}

impl<R: Rng> Iterator for MinibatchStream<R> {
    type Item = Extent;

    /// Always `Some`; the stream is infinite.
    fn next(&mut self) -> Option<Extent> {
        Some(self.next_extent())
    }
}
