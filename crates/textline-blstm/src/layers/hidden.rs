//! One-direction LSTM scan over an image.
//!
//! The recurrence is a true column-to-column data dependency: column `t`
//! reads every neuron's hidden output and cell state from column `t - 1`.
//! The backward direction runs this same code over the column-mirrored
//! image, so the scan itself always moves left to right.
//!
//! Per column, the input vector is the concatenation
//! `[1.0, pixel column, previous hidden outputs]` — all neurons' previous
//! outputs, not just the current neuron's.

use crate::activation::Activation;
use crate::error::{NetworkError, NetworkResult};
use crate::model::DirectionWeights;

/// Scan `columns` image columns through one direction's memory cells.
///
/// `pixels` is column-major, `columns * height` long. Returns the hidden
/// output stream, column-major: all neurons for column 0, then column 1, …
/// (`columns * num_neurons` values).
///
/// # Errors
///
/// - `NetworkError::EmptyInput` if `columns` is zero
/// - `NetworkError::DimensionMismatch` if `pixels` has the wrong length
pub fn scan(
    pixels: &[f32],
    columns: usize,
    weights: &DirectionWeights,
    activation: &Activation,
) -> NetworkResult<Vec<f32>> {
    let topology = weights.topology();
    let height = topology.height;
    let neurons = topology.num_neurons;

    if columns == 0 {
        return Err(NetworkError::EmptyInput("image columns"));
    }
    let expected = columns * height;
    if pixels.len() != expected {
        return Err(NetworkError::DimensionMismatch {
            what: "image pixels",
            expected,
            actual: pixels.len(),
        });
    }

    // Recurrent state, zeroed at the start of every image.
    let mut hidden = vec![0.0f32; neurons];
    let mut cell = vec![0.0f32; neurons];

    let mut source = vec![0.0f32; topology.num_inputs()];
    let mut result = Vec::with_capacity(columns * neurons);

    for column in 0..columns {
        // [1.0, pixel column, previous column's hidden outputs]
        source[0] = 1.0;
        source[1..1 + height].copy_from_slice(&pixels[column * height..(column + 1) * height]);
        source[1 + height..].copy_from_slice(&hidden);

        for neuron in 0..neurons {
            let (state, output) = memory_cell(&source, column, cell[neuron], weights, neuron, activation);
            cell[neuron] = state;
            hidden[neuron] = output;
        }

        result.extend_from_slice(&hidden);
    }

    Ok(result)
}

/// One memory cell for one column: returns `(new_cell_state, output)`.
fn memory_cell(
    source: &[f32],
    column: usize,
    prev_state: f32,
    weights: &DirectionWeights,
    neuron: usize,
    activation: &Activation,
) -> (f32, f32) {
    let [mut gate_in, mut gate_forget, mut gate_out, cell_in] = gate_preactivations(
        source,
        weights.input_gate_row(neuron),
        weights.forget_gate_row(neuron),
        weights.output_gate_row(neuron),
        weights.cell_input_row(neuron),
    );

    // Peephole corrections read the previous cell state; column 0 has none.
    if column > 0 {
        gate_in += weights.input_peephole(neuron) * prev_state;
        gate_forget += weights.forget_peephole(neuron) * prev_state;
    }

    let gi = activation.sigmoid(gate_in);
    let gf = activation.sigmoid(gate_forget);
    let ci = activation.tanh(cell_in);

    let mut state = ci * gi;
    if column > 0 {
        state += gf * prev_state;
        // Output peephole reads the *updated* state.
        gate_out += weights.output_peephole(neuron) * state;
    }

    let go = activation.sigmoid(gate_out);
    let output = activation.tanh(state) * go;

    (state, output)
}

/// Fused dot product of one input vector against four weight rows.
fn gate_preactivations(source: &[f32], w0: &[f32], w1: &[f32], w2: &[f32], w3: &[f32]) -> [f32; 4] {
    let mut acc = [0.0f32; 4];
    for (i, &s) in source.iter().enumerate() {
        acc[0] += s * w0[i];
        acc[1] += s * w1[i];
        acc[2] += s * w2[i];
        acc[3] += s * w3[i];
    }
    acc
}
