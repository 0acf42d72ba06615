//! Serialized model loader.
//!
//! The model file is a flat stream of whitespace-separated floats holding
//! the weight blocks in a fixed order, all row-major:
//!
//! ```text
//! forward:  input-gate, forget-gate, output-gate, cell-input   [n x num_inputs each]
//!           input-, forget-, output-peephole                   [n each]
//! backward: same seven blocks
//! output projection                                            [classes x (1 + 2n)]
//! ```
//!
//! Counts are validated block by block; a short or oversized file aborts
//! the load with a diagnostic naming the offending block.

use std::path::Path;

use textline_blstm::{DirectionWeights, ModelWeights, OutputProjection, Topology};
use tracing::info;

use crate::error::{DatasetError, DatasetResult};
use crate::parse::parse_floats;

/// Load a serialized model for the given topology.
///
/// # Errors
///
/// - `DatasetError::Io` if the file cannot be read
/// - `DatasetError::Parse` on a non-numeric token
/// - `DatasetError::ModelBlockSize` if a block (or the trailing remainder)
///   has the wrong element count
pub fn load_model(path: impl AsRef<Path>, topology: Topology) -> DatasetResult<ModelWeights> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_floats(path, &contents)?;
    let model = build_model(path, topology, values)?;
    info!(path = %path.display(), ?topology, "loaded model weights");
    Ok(model)
}

fn build_model(path: &Path, topology: Topology, values: Vec<f32>) -> DatasetResult<ModelWeights> {
    let gate = topology.num_neurons * topology.num_inputs();
    let peephole = topology.num_neurons;
    let projection = topology.num_classes * topology.projection_width();

    let mut cursor = Cursor {
        path,
        values: &values,
        pos: 0,
    };

    let forward = direction(&mut cursor, topology, gate, peephole, FORWARD_BLOCKS)?;
    let backward = direction(&mut cursor, topology, gate, peephole, BACKWARD_BLOCKS)?;
    let w2 = cursor.take("output projection", projection)?;

    if cursor.pos != values.len() {
        return Err(DatasetError::ModelBlockSize {
            path: path.to_path_buf(),
            what: "trailing values",
            expected: 0,
            actual: values.len() - cursor.pos,
        });
    }

    Ok(ModelWeights::new(
        forward,
        backward,
        OutputProjection::new(topology, w2)?,
    )?)
}

const FORWARD_BLOCKS: [&str; 7] = [
    "forward input gate block",
    "forward forget gate block",
    "forward output gate block",
    "forward cell input block",
    "forward input peephole block",
    "forward forget peephole block",
    "forward output peephole block",
];

const BACKWARD_BLOCKS: [&str; 7] = [
    "backward input gate block",
    "backward forget gate block",
    "backward output gate block",
    "backward cell input block",
    "backward input peephole block",
    "backward forget peephole block",
    "backward output peephole block",
];

fn direction(
    cursor: &mut Cursor<'_>,
    topology: Topology,
    gate: usize,
    peephole: usize,
    names: [&'static str; 7],
) -> DatasetResult<DirectionWeights> {
    let input_gate = cursor.take(names[0], gate)?;
    let forget_gate = cursor.take(names[1], gate)?;
    let output_gate = cursor.take(names[2], gate)?;
    let cell_input = cursor.take(names[3], gate)?;
    let input_peephole = cursor.take(names[4], peephole)?;
    let forget_peephole = cursor.take(names[5], peephole)?;
    let output_peephole = cursor.take(names[6], peephole)?;
    Ok(DirectionWeights::new(
        topology,
        input_gate,
        forget_gate,
        output_gate,
        cell_input,
        input_peephole,
        forget_peephole,
        output_peephole,
    )?)
}

struct Cursor<'a> {
    path: &'a Path,
    values: &'a [f32],
    pos: usize,
}

impl Cursor<'_> {
    fn take(&mut self, what: &'static str, count: usize) -> DatasetResult<Vec<f32>> {
        let remaining = self.values.len() - self.pos;
        if remaining < count {
            return Err(DatasetError::ModelBlockSize {
                path: self.path.to_path_buf(),
                what,
                expected: count,
                actual: remaining,
            });
        }
        let block = self.values[self.pos..self.pos + count].to_vec();
        self.pos += count;
        Ok(block)
    }
}
