use std::convert::TryFrom;

use crate::batching::MinibatchStream;
use crate::optim::build::BuildError;
use crate::optim::choices::MinibatchParameters;

impl TryFrom<MinibatchParameters> for MinibatchStream {
    type Error = BuildError;

    fn try_from(parameters: MinibatchParameters) -> Result<Self, Self::Error> {
        let n_samples = usize::try_from(parameters.n_samples)
            .map_err(|_| BuildError::InvalidParameter("n_samples too large for usize".into()))?;
        let batch_size = usize::try_from(parameters.batch_size)
            .map_err(|_| BuildError::InvalidParameter("batch_size too large for usize".into()))?;

        MinibatchStream::seeded(
            n_samples,
            batch_size,
            parameters.with_replacement,
            parameters.seed,
        )
        .map_err(BuildError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batching::Extent;

    fn parameters(n_samples: u64, batch_size: u64) -> MinibatchParameters {
        MinibatchParameters {
            n_samples,
            batch_size,
            with_replacement: false,
            seed: 42,
        }
    }

    #[test]
    fn builds_a_stream_over_the_expected_partition() {
        let stream = MinibatchStream::try_from(parameters(10, 3)).unwrap();
        assert_eq!(
            stream.extents(),
            &[
                Extent::new(0, 3),
                Extent::new(3, 6),
                Extent::new(6, 9),
                Extent::new(9, 12),
            ]
        );
        assert!(!stream.with_replacement());
    }

    #[test]
    fn seed_makes_built_streams_reproducible() {
        let mut a = MinibatchStream::try_from(parameters(20, 4)).unwrap();
        let b_extents: Vec<_> = MinibatchStream::try_from(parameters(20, 4))
            .unwrap()
            .take(25)
            .collect();
        let a_extents: Vec<_> = (0..25).map(|_| a.next_extent()).collect();
        assert_eq!(a_extents, b_extents);
    }

    #[test]
    fn invalid_batching_configuration_propagates() {
        let err = MinibatchStream::try_from(parameters(0, 3)).unwrap_err();
        assert!(matches!(err, BuildError::Batching(_)));

        let err = MinibatchStream::try_from(parameters(10, 0)).unwrap_err();
        assert!(matches!(err, BuildError::Batching(_)));
    }
}
