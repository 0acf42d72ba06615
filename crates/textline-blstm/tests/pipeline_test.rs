//! End-to-end pipeline tests over small hand-built models.
//!
//! These pin the behaviors a refactor is most likely to disturb: the
//! zero-weight baseline distribution, decode determinism, the
//! chunked/unchunked equivalence when one chunk covers the image, and the
//! mirrored-view round trip.

use textline_blstm::layers::{hidden, output};
use textline_blstm::{
    Activation, ActivationMode, DirectionWeights, LineImage, ModelWeights, OutputProjection,
    Recognizer, RecognizerConfig, Topology,
};

/// 2 neurons, height 1, 2 classes — the smallest interesting network.
fn tiny_topology() -> Topology {
    Topology::new(1, 2, 2).unwrap()
}

/// All-zero model except an output-projection bias of 1.0 for class 0.
fn blank_biased_model(topo: Topology) -> ModelWeights {
    let mut projection = vec![0.0; topo.num_classes * topo.projection_width()];
    projection[0] = 1.0; // class 0 bias
    ModelWeights::new(
        DirectionWeights::zeroed(topo),
        DirectionWeights::zeroed(topo),
        OutputProjection::new(topo, projection).unwrap(),
    )
    .unwrap()
}

#[test]
fn zero_weight_network_settles_on_the_blank_distribution() {
    let topo = tiny_topology();
    let model = blank_biased_model(topo);
    let activation = Activation::new(ActivationMode::Exact).unwrap();

    let image = LineImage::from_pixels(1, vec![0.3, 0.6, 0.9]).unwrap();

    // Hidden outputs are identically zero: tanh(0) * sigmoid(0) = 0.
    let fw = hidden::scan(image.forward(), 3, model.forward(), &activation).unwrap();
    let bw = hidden::scan(image.backward(), 3, model.backward(), &activation).unwrap();
    assert!(fw.iter().all(|&v| v == 0.0));
    assert!(bw.iter().all(|&v| v == 0.0));

    // Every column collapses to [e/(e+1), 1/(e+1)] ~= [0.731, 0.269].
    let probs = output::classify(&fw, &bw, 3, model.projection(), &activation).unwrap();
    let expected0 = std::f32::consts::E / (std::f32::consts::E + 1.0);
    for col in 0..3 {
        assert!((probs[col * 2] - expected0).abs() < 1e-4);
        assert!((probs[col * 2 + 1] - (1.0 - expected0)).abs() < 1e-4);
    }

    // 0.731 > 0.7 everywhere: no edges, empty label sequence.
    let recognizer = Recognizer::from_weights(model).unwrap();
    let labels = recognizer.recognize(&image).unwrap();
    assert!(labels.is_empty());
}

/// A model whose decode is non-trivial: input and output gates held open,
/// forget gate held shut, cell fed by the first pixel row — so each column's
/// output tracks its own pixel — and a projection voting class 1 wherever
/// the forward output is high. Dark pixel runs then decode as characters.
fn pixel_sensitive_model(topo: Topology) -> ModelWeights {
    let inputs = topo.num_inputs();
    let neurons = topo.num_neurons;

    let mut cell_input = vec![0.0; neurons * inputs];
    let mut open_gate = vec![0.0; neurons * inputs];
    let mut shut_gate = vec![0.0; neurons * inputs];
    for n in 0..neurons {
        cell_input[n * inputs + 1] = 3.0; // read the first pixel row
        open_gate[n * inputs] = 10.0;
        shut_gate[n * inputs] = -10.0;
    }
    let direction = || {
        DirectionWeights::new(
            topo,
            open_gate.clone(),
            shut_gate.clone(),
            open_gate.clone(),
            cell_input.clone(),
            vec![0.0; neurons],
            vec![0.0; neurons],
            vec![0.0; neurons],
        )
        .unwrap()
    };

    let width = topo.projection_width();
    let mut projection = vec![0.0; topo.num_classes * width];
    projection[0] = 2.0; // blank bias
    for i in 0..neurons {
        projection[width + 1 + i] = 6.0; // class 1 <- forward outputs
    }

    ModelWeights::new(
        direction(),
        direction(),
        OutputProjection::new(topo, projection).unwrap(),
    )
    .unwrap()
}

/// Light margins around a dark run: the blank dominates the margins and
/// class 1 dominates the run.
fn striped_image(columns_per_band: usize) -> LineImage {
    let mut pixels = Vec::new();
    pixels.extend(std::iter::repeat(0.0).take(columns_per_band));
    pixels.extend(std::iter::repeat(1.0).take(columns_per_band));
    pixels.extend(std::iter::repeat(0.0).take(columns_per_band));
    LineImage::from_pixels(1, pixels).unwrap()
}

#[test]
fn dark_run_decodes_as_one_character() {
    let model = pixel_sensitive_model(tiny_topology());
    let recognizer = Recognizer::from_weights(model).unwrap();
    let labels = recognizer.recognize(&striped_image(4)).unwrap();
    assert_eq!(labels, vec![1]);
}

#[test]
fn inference_is_deterministic() {
    let model = pixel_sensitive_model(tiny_topology());
    let recognizer = Recognizer::from_weights(model).unwrap();
    let image = striped_image(5);

    let first = recognizer.recognize(&image).unwrap();
    for _ in 0..5 {
        assert_eq!(recognizer.recognize(&image).unwrap(), first);
    }
}

#[test]
fn whole_image_chunk_matches_unchunked() {
    let model = pixel_sensitive_model(tiny_topology());
    let recognizer = Recognizer::from_weights(model).unwrap();
    let image = striped_image(4);

    let full = recognizer.recognize(&image).unwrap();
    let chunked = recognizer
        .recognize_chunked(&image, image.columns())
        .unwrap();
    assert_eq!(full, chunked);

    // An oversized chunk degenerates the same way.
    let oversized = recognizer
        .recognize_chunked(&image, image.columns() * 3)
        .unwrap();
    assert_eq!(full, oversized);
}

#[test]
fn chunked_inference_walks_left_to_right() {
    // Two well-separated dark runs; even with a cut between them the chunks
    // must emit their characters in reading order.
    let model = pixel_sensitive_model(tiny_topology());
    let recognizer = Recognizer::from_weights(model).unwrap();

    let mut pixels = Vec::new();
    for _ in 0..2 {
        pixels.extend(std::iter::repeat(0.0).take(6));
        pixels.extend(std::iter::repeat(1.0).take(4));
    }
    pixels.extend(std::iter::repeat(0.0).take(6));
    let image = LineImage::from_pixels(1, pixels).unwrap();

    let full = recognizer.recognize(&image).unwrap();
    assert_eq!(full, vec![1, 1]);

    // Cut at a light margin (column 13 lies in the middle gap).
    let chunked = recognizer.recognize_chunked(&image, 13).unwrap();
    assert_eq!(chunked, vec![1, 1]);
}

#[test]
fn batch_results_match_single_image_runs() {
    let model = pixel_sensitive_model(tiny_topology());
    let recognizer = Recognizer::from_weights(model).unwrap();

    let images: Vec<LineImage> = (2..6).map(striped_image).collect();
    let individually: Vec<Vec<usize>> = images
        .iter()
        .map(|img| recognizer.recognize(img).unwrap())
        .collect();

    let batch = recognizer.recognize_batch(&images);
    for (got, want) in batch.into_iter().zip(individually) {
        assert_eq!(got.unwrap(), want);
    }
}

#[test]
fn softmax_columns_are_normalized_for_every_strategy() {
    for mode in [
        ActivationMode::Exact,
        ActivationMode::Fast,
        ActivationMode::Lookup,
    ] {
        let topo = tiny_topology();
        let model = pixel_sensitive_model(topo);
        let activation = Activation::new(mode).unwrap();
        let image = striped_image(3);

        let fw = hidden::scan(image.forward(), 9, model.forward(), &activation).unwrap();
        let bw = hidden::scan(image.backward(), 9, model.backward(), &activation).unwrap();
        let probs = output::classify(&fw, &bw, 9, model.projection(), &activation).unwrap();

        for col in 0..9 {
            let sum: f32 = probs[col * 2..(col + 1) * 2].iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-4,
                "{mode:?}: column {col} sums to {sum}"
            );
        }
    }
}

#[test]
fn mirrored_view_round_trips() {
    let pixels: Vec<f32> = (0..30).map(|i| (i as f32).sin()).collect();
    let image = LineImage::from_pixels(3, pixels.clone()).unwrap();

    // Mirroring the mirrored view restores the original column order.
    let remirrored = LineImage::from_pixels(3, image.backward().to_vec()).unwrap();
    assert_eq!(remirrored.backward(), image.forward());
    assert_eq!(remirrored.forward(), image.backward());
    assert_eq!(image.forward(), &pixels[..]);
}

#[test]
fn all_strategies_agree_on_the_decoded_labels() {
    // Precision differs between the numerical policies; on a clean synthetic
    // image the decoded sequence must not.
    let topo = tiny_topology();
    let image = striped_image(4);
    let mut decoded = Vec::new();
    for mode in [
        ActivationMode::Exact,
        ActivationMode::Fast,
        ActivationMode::Lookup,
    ] {
        let config = RecognizerConfig {
            topology: topo,
            activation: mode,
            ..RecognizerConfig::default()
        };
        let recognizer = Recognizer::new(pixel_sensitive_model(topo), &config).unwrap();
        decoded.push(recognizer.recognize(&image).unwrap());
    }
    assert_eq!(decoded[0], decoded[1]);
    assert_eq!(decoded[1], decoded[2]);
}
