//! Network shape parameters and reference model constants.
//!
//! The shape of the network is a runtime value, not a compile-time constant:
//! the same pipeline runs the reference 25x100x110 model and the tiny
//! topologies used by tests. `Topology::num_inputs()` encodes the one
//! structural invariant everything else depends on:
//!
//! ```text
//! num_inputs = 1 (bias) + height (pixel column) + num_neurons (recurrent feedback)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};

// =============================================================================
// REFERENCE MODEL CONSTANTS
// =============================================================================

/// Pixel rows per image column in the reference model.
pub const REFERENCE_HEIGHT: usize = 25;

/// LSTM memory cells per direction in the reference model.
pub const REFERENCE_NEURONS: usize = 100;

/// Output classes (alphabet symbols incl. the blank at index 0) in the
/// reference model.
pub const REFERENCE_CLASSES: usize = 110;

/// Default cap on the decoded label sequence length.
pub const DEFAULT_MAX_LABEL_LEN: usize = 83;

/// Default blank-probability threshold for the decoder.
pub const DEFAULT_BLANK_THRESHOLD: f32 = 0.7;

// =============================================================================
// TOPOLOGY
// =============================================================================

/// Shape of one bidirectional network instance.
///
/// # Example
///
/// ```rust
/// use textline_blstm::Topology;
///
/// let topo = Topology::default();
/// assert_eq!(topo.num_inputs(), 126); // 1 + 25 + 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Pixel rows per image column.
    pub height: usize,
    /// LSTM memory cells per direction.
    pub num_neurons: usize,
    /// Output classes; index 0 is the blank.
    pub num_classes: usize,
}

impl Topology {
    /// Create a topology, rejecting zero-sized dimensions.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ConfigError` if any dimension is zero.
    pub fn new(height: usize, num_neurons: usize, num_classes: usize) -> NetworkResult<Self> {
        let topo = Self {
            height,
            num_neurons,
            num_classes,
        };
        topo.validate()?;
        Ok(topo)
    }

    /// Check that all dimensions are nonzero.
    pub fn validate(&self) -> NetworkResult<()> {
        for (name, value) in [
            ("height", self.height),
            ("num_neurons", self.num_neurons),
            ("num_classes", self.num_classes),
        ] {
            if value == 0 {
                return Err(NetworkError::ConfigError {
                    message: format!("topology {} must be nonzero", name),
                });
            }
        }
        Ok(())
    }

    /// Width of the recurrent-layer input vector:
    /// bias + pixel column + previous hidden outputs.
    #[inline]
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        1 + self.height + self.num_neurons
    }

    /// Width of one output-projection row:
    /// bias + forward hidden vector + backward hidden vector.
    #[inline]
    #[must_use]
    pub fn projection_width(&self) -> usize {
        1 + 2 * self.num_neurons
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            height: REFERENCE_HEIGHT,
            num_neurons: REFERENCE_NEURONS,
            num_classes: REFERENCE_CLASSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_topology_matches_trained_model() {
        let topo = Topology::default();
        assert_eq!(topo.num_inputs(), 126);
        assert_eq!(topo.projection_width(), 201);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(Topology::new(0, 100, 110).is_err());
        assert!(Topology::new(25, 0, 110).is_err());
        assert!(Topology::new(25, 100, 0).is_err());
    }

    #[test]
    fn tiny_topology_is_accepted() {
        let topo = Topology::new(1, 2, 2).unwrap();
        assert_eq!(topo.num_inputs(), 4);
        assert_eq!(topo.projection_width(), 5);
    }
}
