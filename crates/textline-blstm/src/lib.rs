//! Bidirectional LSTM text-line recognition.
//!
//! The pipeline scans a line image in both directions with peephole LSTM
//! memory cells, classifies every column with a softmax layer over the
//! paired direction outputs, and collapses the probability stream into a
//! label sequence with a threshold-crossing decoder.
//!
//! # Architecture
//!
//! ```text
//! LineImage (forward + mirrored views)
//!     |                     |
//!     v                     v
//! [hidden scan, fw]   [hidden scan, bw]     (independent, run in parallel)
//!     |                     |
//!     +---------+-----------+
//!               v
//!       [output classifier]                 (mirrored column pairing + softmax)
//!               v
//!       [label decoder]                     (blank-threshold segmentation)
//!               v
//!       label indices -> alphabet lookup (external)
//! ```
//!
//! Weights are a read-only artifact loaded once ([`ModelWeights`]); training
//! is out of scope. The numerical policy for sigmoid/tanh/exp is swappable
//! ([`ActivationMode`]) without touching the layer code.
//!
//! # Example
//!
//! ```rust
//! use textline_blstm::{LineImage, ModelWeights, Recognizer, Topology};
//!
//! let topology = Topology::new(4, 6, 8).unwrap();
//! let recognizer = Recognizer::from_weights(ModelWeights::zeroed(topology)).unwrap();
//!
//! let image = LineImage::from_pixels(4, vec![0.25; 40]).unwrap();
//! let labels = recognizer.recognize(&image).unwrap();
//! assert!(labels.len() <= recognizer.decoder_config().max_label_len);
//! ```

pub mod activation;
pub mod config;
pub mod decoder;
pub mod error;
pub mod image;
pub mod kernel;
pub mod layers;
pub mod matrix;
pub mod metrics;
pub mod model;
pub mod topology;

pub use activation::{Activation, ActivationMode, LookupConfig, LookupSpec};
pub use config::{DecoderConfig, RecognizerConfig};
pub use error::{NetworkError, NetworkResult};
pub use image::LineImage;
pub use kernel::Recognizer;
pub use matrix::Matrix;
pub use metrics::{edit_distance, EditDistance};
pub use model::{DirectionWeights, ModelWeights, OutputProjection};
pub use topology::Topology;
