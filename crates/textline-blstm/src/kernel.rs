//! The recognizer: wires the recurrent scans, the classifier and the
//! decoder together for one image, a chunked image, or a batch.

use rayon::prelude::*;
use tracing::debug;

use crate::activation::Activation;
use crate::config::{DecoderConfig, RecognizerConfig};
use crate::decoder;
use crate::error::{NetworkError, NetworkResult};
use crate::image::LineImage;
use crate::layers::{hidden, output};
use crate::model::ModelWeights;

/// One loaded recognizer instance.
///
/// Holds the immutable model weights plus the activation and decoder
/// policies. All inference methods take `&self`; per-image scratch lives on
/// the call stack, so a `Recognizer` can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use textline_blstm::{LineImage, ModelWeights, Recognizer, Topology};
///
/// let topo = Topology::new(2, 3, 4).unwrap();
/// let recognizer = Recognizer::from_weights(ModelWeights::zeroed(topo)).unwrap();
/// let image = LineImage::from_pixels(2, vec![0.5; 12]).unwrap();
/// let labels = recognizer.recognize(&image).unwrap();
/// assert!(labels.is_empty()); // zero weights never cross the threshold
/// ```
#[derive(Debug)]
pub struct Recognizer {
    weights: ModelWeights,
    activation: Activation,
    decoder: DecoderConfig,
}

impl Recognizer {
    /// Build a recognizer from weights and a full configuration.
    ///
    /// # Errors
    ///
    /// - `NetworkError::ConfigError` if the config fails validation or its
    ///   topology disagrees with the weights
    pub fn new(weights: ModelWeights, config: &RecognizerConfig) -> NetworkResult<Self> {
        config.validate()?;
        if weights.topology() != config.topology {
            return Err(NetworkError::ConfigError {
                message: format!(
                    "configured topology {:?} does not match model topology {:?}",
                    config.topology,
                    weights.topology()
                ),
            });
        }
        let activation = Activation::with_lookup(config.activation, &config.lookup)?;
        Ok(Self {
            weights,
            activation,
            decoder: config.decoder,
        })
    }

    /// Build a recognizer with default activation and decoder settings.
    pub fn from_weights(weights: ModelWeights) -> NetworkResult<Self> {
        let config = RecognizerConfig {
            topology: weights.topology(),
            ..RecognizerConfig::default()
        };
        Self::new(weights, &config)
    }

    #[inline]
    #[must_use]
    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    #[inline]
    #[must_use]
    pub fn decoder_config(&self) -> DecoderConfig {
        self.decoder
    }

    /// Full-sequence inference over one image.
    ///
    /// Runs the forward and backward scans (concurrently — they only share
    /// the read-only weights), pairs their outputs in the classifier and
    /// decodes the label sequence.
    ///
    /// # Errors
    ///
    /// - `NetworkError::ConfigError` if the image height does not match the
    ///   model topology
    /// - shape errors from the layers on malformed buffers
    pub fn recognize(&self, image: &LineImage) -> NetworkResult<Vec<usize>> {
        self.check_height(image)?;
        debug!(columns = image.columns(), "running full-sequence inference");
        self.run_slices(image.forward(), image.backward(), image.columns())
    }

    /// Memory-bounded inference: process the image in chunks of
    /// `chunk_columns`, resetting the recurrent state at every chunk
    /// boundary.
    ///
    /// This trades accuracy near the cut points for bounded scratch memory;
    /// it is a distinct, opt-in mode. With `chunk_columns >= columns` it
    /// degenerates to [`recognize`](Self::recognize).
    ///
    /// # Errors
    ///
    /// - `NetworkError::ConfigError` if `chunk_columns` is zero or the image
    ///   height does not match
    pub fn recognize_chunked(
        &self,
        image: &LineImage,
        chunk_columns: usize,
    ) -> NetworkResult<Vec<usize>> {
        if chunk_columns == 0 {
            return Err(NetworkError::ConfigError {
                message: "chunk_columns must be nonzero".to_string(),
            });
        }
        self.check_height(image)?;

        let height = self.weights.topology().height;
        let columns = image.columns();
        let mut labels = Vec::new();
        let mut remaining = columns;
        let mut col = 0;

        while col < columns {
            let chunk = remaining.min(chunk_columns);

            // The forward slice advances left to right; the matching
            // backward columns sit at the mirrored end of the backward
            // buffer.
            let fw = &image.forward()[col * height..(col + chunk) * height];
            let bw_start = (remaining - chunk) * height;
            let bw = &image.backward()[bw_start..bw_start + chunk * height];

            debug!(col, chunk, "running chunked inference step");
            let chunk_labels = self.run_slices(fw, bw, chunk)?;
            labels.extend(chunk_labels);

            remaining -= chunk;
            col += chunk;
        }

        Ok(labels)
    }

    /// Independent inference over a batch of images, data-parallel.
    ///
    /// Each slot carries its own result: one malformed image does not abort
    /// the rest of the batch.
    pub fn recognize_batch(&self, images: &[LineImage]) -> Vec<NetworkResult<Vec<usize>>> {
        images.par_iter().map(|img| self.recognize(img)).collect()
    }

    /// The shared pipeline body over raw forward/backward pixel slices.
    fn run_slices(&self, fw: &[f32], bw: &[f32], columns: usize) -> NetworkResult<Vec<usize>> {
        let (fw_hidden, bw_hidden) = rayon::join(
            || hidden::scan(fw, columns, self.weights.forward(), &self.activation),
            || hidden::scan(bw, columns, self.weights.backward(), &self.activation),
        );
        let fw_hidden = fw_hidden?;
        let bw_hidden = bw_hidden?;

        let probs = output::classify(
            &fw_hidden,
            &bw_hidden,
            columns,
            self.weights.projection(),
            &self.activation,
        )?;

        decoder::decode(
            &probs,
            columns,
            self.weights.topology().num_classes,
            self.decoder.blank_threshold,
            self.decoder.max_label_len,
        )
    }

    fn check_height(&self, image: &LineImage) -> NetworkResult<()> {
        let expected = self.weights.topology().height;
        if image.height() != expected {
            return Err(NetworkError::ConfigError {
                message: format!(
                    "image height {} does not match model height {}",
                    image.height(),
                    expected
                ),
            });
        }
        Ok(())
    }
}
