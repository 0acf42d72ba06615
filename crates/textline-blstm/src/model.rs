//! Trained model parameters: per-direction LSTM weights and the output
//! projection.
//!
//! Everything here is loaded once and shared read-only for the lifetime of
//! the process; inference never mutates a weight. All element counts are
//! validated at construction so a mis-sized model fails before the first
//! image is touched, with a diagnostic naming the offending block.

use crate::error::{NetworkError, NetworkResult};
use crate::matrix::Matrix;
use crate::topology::Topology;

// =============================================================================
// PER-DIRECTION WEIGHTS
// =============================================================================

/// Weights for one scan direction.
///
/// Four gate matrices of shape `[num_neurons x num_inputs]` and three
/// peephole vectors of length `num_neurons`, where
/// `num_inputs = 1 + height + num_neurons`.
#[derive(Debug, Clone)]
pub struct DirectionWeights {
    topology: Topology,
    input_gate: Matrix,
    forget_gate: Matrix,
    output_gate: Matrix,
    cell_input: Matrix,
    input_peephole: Vec<f32>,
    forget_peephole: Vec<f32>,
    output_peephole: Vec<f32>,
}

impl DirectionWeights {
    /// Assemble one direction's weights from flat row-major buffers.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::DimensionMismatch` naming the first mis-sized
    /// block; gate matrices must hold `num_neurons * num_inputs` elements,
    /// peephole vectors `num_neurons`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topology: Topology,
        input_gate: Vec<f32>,
        forget_gate: Vec<f32>,
        output_gate: Vec<f32>,
        cell_input: Vec<f32>,
        input_peephole: Vec<f32>,
        forget_peephole: Vec<f32>,
        output_peephole: Vec<f32>,
    ) -> NetworkResult<Self> {
        topology.validate()?;
        let neurons = topology.num_neurons;
        let inputs = topology.num_inputs();

        let input_gate = Matrix::from_vec("input gate weights", neurons, inputs, input_gate)?;
        let forget_gate = Matrix::from_vec("forget gate weights", neurons, inputs, forget_gate)?;
        let output_gate = Matrix::from_vec("output gate weights", neurons, inputs, output_gate)?;
        let cell_input = Matrix::from_vec("cell input weights", neurons, inputs, cell_input)?;

        check_len("input peephole weights", neurons, &input_peephole)?;
        check_len("forget peephole weights", neurons, &forget_peephole)?;
        check_len("output peephole weights", neurons, &output_peephole)?;

        Ok(Self {
            topology,
            input_gate,
            forget_gate,
            output_gate,
            cell_input,
            input_peephole,
            forget_peephole,
            output_peephole,
        })
    }

    /// All-zero weights; handy for tests and shape probing.
    #[must_use]
    pub fn zeroed(topology: Topology) -> Self {
        let neurons = topology.num_neurons;
        let inputs = topology.num_inputs();
        Self {
            topology,
            input_gate: Matrix::zeros(neurons, inputs),
            forget_gate: Matrix::zeros(neurons, inputs),
            output_gate: Matrix::zeros(neurons, inputs),
            cell_input: Matrix::zeros(neurons, inputs),
            input_peephole: vec![0.0; neurons],
            forget_peephole: vec![0.0; neurons],
            output_peephole: vec![0.0; neurons],
        }
    }

    #[inline]
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub(crate) fn input_gate_row(&self, neuron: usize) -> &[f32] {
        self.input_gate.row(neuron)
    }

    #[inline]
    pub(crate) fn forget_gate_row(&self, neuron: usize) -> &[f32] {
        self.forget_gate.row(neuron)
    }

    #[inline]
    pub(crate) fn output_gate_row(&self, neuron: usize) -> &[f32] {
        self.output_gate.row(neuron)
    }

    #[inline]
    pub(crate) fn cell_input_row(&self, neuron: usize) -> &[f32] {
        self.cell_input.row(neuron)
    }

    #[inline]
    pub(crate) fn input_peephole(&self, neuron: usize) -> f32 {
        self.input_peephole[neuron]
    }

    #[inline]
    pub(crate) fn forget_peephole(&self, neuron: usize) -> f32 {
        self.forget_peephole[neuron]
    }

    #[inline]
    pub(crate) fn output_peephole(&self, neuron: usize) -> f32 {
        self.output_peephole[neuron]
    }
}

fn check_len(what: &'static str, expected: usize, values: &[f32]) -> NetworkResult<()> {
    if values.len() != expected {
        return Err(NetworkError::DimensionMismatch {
            what,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

// =============================================================================
// OUTPUT PROJECTION
// =============================================================================

/// Linear classifier over the concatenated forward+backward hidden vectors.
///
/// One row per class: `[bias, w_fw[0..n], w_bw[0..n]]`.
#[derive(Debug, Clone)]
pub struct OutputProjection {
    topology: Topology,
    weights: Matrix,
}

impl OutputProjection {
    /// Wrap a flat row-major buffer of
    /// `num_classes * (1 + 2 * num_neurons)` elements.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::DimensionMismatch` on a wrong element count.
    pub fn new(topology: Topology, weights: Vec<f32>) -> NetworkResult<Self> {
        topology.validate()?;
        let weights = Matrix::from_vec(
            "output projection weights",
            topology.num_classes,
            topology.projection_width(),
            weights,
        )?;
        Ok(Self { topology, weights })
    }

    /// All-zero projection.
    #[must_use]
    pub fn zeroed(topology: Topology) -> Self {
        Self {
            topology,
            weights: Matrix::zeros(topology.num_classes, topology.projection_width()),
        }
    }

    #[inline]
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// One class row: bias followed by forward then backward weights.
    #[inline]
    pub(crate) fn class_row(&self, class: usize) -> &[f32] {
        self.weights.row(class)
    }
}

// =============================================================================
// MODEL BUNDLE
// =============================================================================

/// The full trained model: both directions plus the output projection.
#[derive(Debug, Clone)]
pub struct ModelWeights {
    topology: Topology,
    forward: DirectionWeights,
    backward: DirectionWeights,
    projection: OutputProjection,
}

impl ModelWeights {
    /// Bundle the three weight blocks, checking they agree on one topology.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ConfigError` if the blocks were built against
    /// different topologies.
    pub fn new(
        forward: DirectionWeights,
        backward: DirectionWeights,
        projection: OutputProjection,
    ) -> NetworkResult<Self> {
        let topology = forward.topology();
        if backward.topology() != topology || projection.topology() != topology {
            return Err(NetworkError::ConfigError {
                message: format!(
                    "weight blocks disagree on topology: forward {:?}, backward {:?}, projection {:?}",
                    topology,
                    backward.topology(),
                    projection.topology()
                ),
            });
        }
        Ok(Self {
            topology,
            forward,
            backward,
            projection,
        })
    }

    /// All-zero model; every gate and projection weight is 0.
    #[must_use]
    pub fn zeroed(topology: Topology) -> Self {
        Self {
            topology,
            forward: DirectionWeights::zeroed(topology),
            backward: DirectionWeights::zeroed(topology),
            projection: OutputProjection::zeroed(topology),
        }
    }

    #[inline]
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    #[must_use]
    pub fn forward(&self) -> &DirectionWeights {
        &self.forward
    }

    #[inline]
    #[must_use]
    pub fn backward(&self) -> &DirectionWeights {
        &self.backward
    }

    #[inline]
    #[must_use]
    pub fn projection(&self) -> &OutputProjection {
        &self.projection
    }
}
