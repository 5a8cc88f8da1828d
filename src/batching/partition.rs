use crate::batching::{BatchingError, Extent};

/// Splits `n_samples` rows into contiguous extents of `batch_size` rows each.
///
/// When `n_samples` does not divide evenly one extra trailing extent covers
/// the remainder. Every extent, the trailing one included, is computed as
/// `(i * batch_size, (i + 1) * batch_size)`; the final `stop` is not capped
/// at `n_samples`, so a consumer slicing a real container clamps it first
/// (see [`Extent::clamped`]).
///
/// `partition(0, b)` is the empty partition. `batch_size == 0` is rejected.
pub fn partition(n_samples: usize, batch_size: usize) -> Result<Vec<Extent>, BatchingError> {
    if batch_size == 0 {
        return Err(BatchingError::InvalidConfiguration(
            "batch_size must be > 0".into(),
        ));
    }

    let mut n_batches = n_samples / batch_size;
    if n_samples % batch_size != 0 {
        n_batches += 1;
    }

    Ok((0..n_batches)
        .map(|i| Extent::new(i * batch_size, (i + 1) * batch_size))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uneven_split_keeps_raw_trailing_stop() {
        let extents = partition(10, 3).unwrap();
        let expected = vec![
            Extent::new(0, 3),
            Extent::new(3, 6),
            Extent::new(6, 9),
            Extent::new(9, 12),
        ];
        assert_eq!(extents, expected);
    }

    #[test]
    fn even_split_has_no_remainder_extent() {
        let extents = partition(9, 3).unwrap();
        assert_eq!(
            extents,
            vec![Extent::new(0, 3), Extent::new(3, 6), Extent::new(6, 9)]
        );
    }

    #[test]
    fn batch_count_is_ceiling_of_the_division() {
        for n_samples in 1..40usize {
            for batch_size in 1..13usize {
                let extents = partition(n_samples, batch_size).unwrap();
                assert_eq!(
                    extents.len(),
                    n_samples.div_ceil(batch_size),
                    "n_samples={n_samples} batch_size={batch_size}"
                );
            }
        }
    }

    #[test]
    fn clamped_extents_tile_the_dataset_exactly() {
        for n_samples in 0..40usize {
            for batch_size in 1..13usize {
                let extents = partition(n_samples, batch_size).unwrap();
                let mut next_start = 0;
                for extent in &extents {
                    let clamped = extent.clamped(n_samples);
                    assert_eq!(clamped.start, next_start);
                    assert!(!clamped.is_empty());
                    next_start = clamped.stop;
                }
                assert_eq!(next_start, n_samples);
            }
        }
    }

    #[test]
    fn zero_samples_yield_an_empty_partition() {
        assert!(partition(0, 4).unwrap().is_empty());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = partition(10, 0).unwrap_err();
        assert!(matches!(err, BatchingError::InvalidConfiguration(_)));
    }

    #[test]
    fn repeated_calls_agree() {
        assert_eq!(partition(23, 5).unwrap(), partition(23, 5).unwrap());
    }
}
