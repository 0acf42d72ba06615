//! Per-column classifier over the paired direction outputs.
//!
//! The backward scan ran over the mirrored image, so its column `c` holds
//! the network's view of original column `columns - 1 - c`; pairing forward
//! column `c` with backward column `columns - 1 - c` restores temporal
//! alignment before the linear classifier.

use tracing::warn;

use crate::activation::Activation;
use crate::error::{NetworkError, NetworkResult};
use crate::model::OutputProjection;

/// Compute per-class probabilities for every column.
///
/// `forward` and `backward` are the column-major hidden streams
/// (`columns * num_neurons` each). Returns `columns * num_classes`
/// probabilities, column-major, class-minor. Each column is softmax
/// normalized unless its exponential sum is zero, in which case the raw
/// values are emitted to avoid a NaN column.
///
/// # Errors
///
/// - `NetworkError::EmptyInput` if `columns` is zero
/// - `NetworkError::DimensionMismatch` if either stream has the wrong length
pub fn classify(
    forward: &[f32],
    backward: &[f32],
    columns: usize,
    projection: &OutputProjection,
    activation: &Activation,
) -> NetworkResult<Vec<f32>> {
    let topology = projection.topology();
    let neurons = topology.num_neurons;
    let classes = topology.num_classes;

    if columns == 0 {
        return Err(NetworkError::EmptyInput("hidden-layer columns"));
    }
    let expected = columns * neurons;
    if forward.len() != expected {
        return Err(NetworkError::DimensionMismatch {
            what: "forward hidden stream",
            expected,
            actual: forward.len(),
        });
    }
    if backward.len() != expected {
        return Err(NetworkError::DimensionMismatch {
            what: "backward hidden stream",
            expected,
            actual: backward.len(),
        });
    }

    let mut probs = vec![0.0f32; columns * classes];

    for col in 0..columns {
        let fw = &forward[col * neurons..(col + 1) * neurons];
        let bw_col = columns - 1 - col;
        let bw = &backward[bw_col * neurons..(bw_col + 1) * neurons];
        let out = &mut probs[col * classes..(col + 1) * classes];

        for (class, slot) in out.iter_mut().enumerate() {
            // Row layout: [bias, forward weights, backward weights].
            let row = projection.class_row(class);
            let mut score = row[0];
            for i in 0..neurons {
                score += row[1 + i] * fw[i];
            }
            for i in 0..neurons {
                score += row[1 + neurons + i] * bw[i];
            }
            *slot = activation.exp(score);
        }

        let sum: f32 = out.iter().sum();
        if sum == 0.0 {
            warn!(column = col, "softmax sum is zero, emitting unnormalized scores");
        } else {
            for p in out.iter_mut() {
                *p /= sum;
            }
        }
    }

    Ok(probs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationMode;
    use crate::model::OutputProjection;
    use crate::topology::Topology;

    fn act() -> Activation {
        Activation::new(ActivationMode::Exact).unwrap()
    }

    #[test]
    fn columns_sum_to_one() {
        let topo = Topology::new(1, 2, 3).unwrap();
        // Arbitrary projection weights.
        let data: Vec<f32> = (0..topo.num_classes * topo.projection_width())
            .map(|i| (i as f32) * 0.05 - 0.3)
            .collect();
        let projection = OutputProjection::new(topo, data).unwrap();

        let forward = vec![0.2, -0.1, 0.4, 0.3, 0.0, 0.25];
        let backward = vec![0.1, 0.1, -0.2, 0.5, 0.3, -0.3];
        let probs = classify(&forward, &backward, 3, &projection, &act()).unwrap();

        assert_eq!(probs.len(), 9);
        for col in 0..3 {
            let sum: f32 = probs[col * 3..(col + 1) * 3].iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "column {col} sums to {sum}");
        }
    }

    #[test]
    fn bias_only_projection_gives_fixed_distribution() {
        let topo = Topology::new(1, 2, 2).unwrap();
        // Class 0 bias 1.0, class 1 bias 0.0, everything else zero.
        let mut data = vec![0.0; 2 * topo.projection_width()];
        data[0] = 1.0;
        let projection = OutputProjection::new(topo, data).unwrap();

        let zeros = vec![0.0; 3 * 2];
        let probs = classify(&zeros, &zeros, 3, &projection, &act()).unwrap();

        let expected0 = 1f32.exp() / (1f32.exp() + 1.0);
        for col in 0..3 {
            assert!((probs[col * 2] - expected0).abs() < 1e-5);
            assert!((probs[col * 2 + 1] - (1.0 - expected0)).abs() < 1e-5);
        }
    }

    #[test]
    fn backward_column_pairing_is_mirrored() {
        // One neuron per direction; classifier reads only the backward
        // neuron. The backward stream holds distinct values per column, so
        // output column 0 must see the *last* backward column.
        let topo = Topology::new(1, 1, 2).unwrap();
        let mut data = vec![0.0; 2 * topo.projection_width()];
        data[2] = 1.0; // class 0 <- backward neuron
        let projection = OutputProjection::new(topo, data).unwrap();

        let forward = vec![0.0, 0.0, 0.0];
        let backward = vec![5.0, 0.0, 0.0];
        let probs = classify(&forward, &backward, 3, &projection, &act()).unwrap();

        // backward[0] = 5.0 pairs with output column 2.
        assert!(probs[2 * 2] > 0.95, "column 2 class 0 should dominate");
        // Columns 0 and 1 see backward value 0 -> uniform distribution.
        assert!((probs[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn zero_sum_skips_normalization() {
        // A lookup-table exp clamps scores below -5 to exactly 0; with a
        // strongly negative bias every class lands at 0 and the column sum
        // is 0.
        let topo = Topology::new(1, 1, 2).unwrap();
        let mut data = vec![0.0; 2 * topo.projection_width()];
        data[0] = -50.0;
        data[topo.projection_width()] = -50.0;
        let projection = OutputProjection::new(topo, data).unwrap();
        let lookup = Activation::new(ActivationMode::Lookup).unwrap();

        let stream = vec![0.0; 2];
        let probs = classify(&stream, &stream, 2, &projection, &lookup).unwrap();
        // Unnormalized zeros, not NaN.
        assert!(probs.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn mismatched_stream_length_fails_fast() {
        let topo = Topology::new(1, 2, 2).unwrap();
        let projection = OutputProjection::zeroed(topo);
        let err = classify(&[0.0; 5], &[0.0; 6], 3, &projection, &act()).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::DimensionMismatch {
                what: "forward hidden stream",
                ..
            }
        ));
    }
}
