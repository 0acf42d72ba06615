//! Threshold-crossing label decoder.
//!
//! Collapses the per-column probability stream into a label sequence by
//! watching the blank class (index 0) cross a threshold: a falling edge
//! opens a character segment, a rising edge closes it, and the label is the
//! class of the maximum probability anywhere inside the segment. This is a
//! boundary-detection heuristic, not a CTC forward-backward decode — it
//! relies on the blank behaving as a clean separator signal.
//!
//! Known boundary condition, preserved from the reference behavior: a rising
//! edge with no preceding falling edge reuses the stale (initially zero)
//! segment start, so the argmax runs from the beginning of the stream. See
//! the `rising_edge_without_falling_edge` test.

use crate::error::{NetworkError, NetworkResult};

/// Decode a column-major, class-minor probability stream
/// (`columns * num_classes` values) into class indices.
///
/// At most `max_label_len` labels are returned; further matches are
/// silently dropped.
///
/// # Errors
///
/// Returns `NetworkError::DimensionMismatch` if the stream length does not
/// equal `columns * num_classes`.
pub fn decode(
    probs: &[f32],
    columns: usize,
    num_classes: usize,
    threshold: f32,
    max_label_len: usize,
) -> NetworkResult<Vec<usize>> {
    if num_classes == 0 {
        return Err(NetworkError::EmptyInput("classes"));
    }
    let expected = columns * num_classes;
    if probs.len() != expected {
        return Err(NetworkError::DimensionMismatch {
            what: "probability stream",
            expected,
            actual: probs.len(),
        });
    }

    let mut labels = Vec::new();
    // Flattened index of the open segment's first column.
    let mut left = 0usize;

    for col in 0..columns.saturating_sub(1) {
        let blank_here = probs[col * num_classes];
        let blank_next = probs[(col + 1) * num_classes];

        if blank_here > threshold && blank_next < threshold {
            // Falling edge: a character segment starts at the next column.
            left = (col + 1) * num_classes;
        } else if blank_here < threshold && blank_next > threshold {
            // Rising edge: close the segment and pick its strongest class.
            let right = (col + 1) * num_classes;
            let offset = max_element(probs, left, right);
            let label = offset % num_classes;
            if labels.len() < max_label_len {
                labels.push(label);
            }
        }
    }

    Ok(labels)
}

/// Index of the first maximum in `values[first..last)`; returns `first`
/// when the range is empty.
fn max_element(values: &[f32], first: usize, last: usize) -> usize {
    let mut result = first;
    let mut i = first;
    while i + 1 < last {
        i += 1;
        if values[result] < values[i] {
            result = i;
        }
    }
    result
}
