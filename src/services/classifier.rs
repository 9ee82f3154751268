// src/services/classifier.rs
// DOCUMENTATION: Place classification model
// PURPOSE: Forward pass over a preprocessed tensor; ONNX Runtime backed

use anyhow::{anyhow, bail, Context, Result};
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;

/// A model mapping one image tensor to class scores
pub trait ImageClassifier: Send + Sync {
    /// Scores for every class of a batch-of-one input
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// Index of the highest score; the first one wins on ties, NaN never wins
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Classifier exported to ONNX (EfficientNet-B0, 224x224 by default)
pub struct OnnxClassifier {
    /// Runs need exclusive access to the session
    session: Mutex<Session>,
    input_name: String,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load the model from disk, CPU only
    pub fn load<P: AsRef<Path>>(model_path: P, intra_threads: usize) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            bail!("Classifier model not found: {}", model_path.display());
        }

        log::info!("Loading classifier from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(intra_threads.max(1))
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load classifier from {}", model_path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| anyhow!("Classifier has no inputs"))?;

        log::info!("Classifier loaded (input: {})", input_name);

        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

impl ImageClassifier for OnnxClassifier {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        if input.shape()[0] != 1 {
            bail!("Expected a batch of one, got shape {:?}", input.shape());
        }

        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Classifier session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Classifier inference failed")?;

        let scores = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        Ok(scores.iter().copied().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Classifier returning fixed scores, for pipeline tests
    pub(crate) struct FixedClassifier(pub Vec<f32>);

    impl ImageClassifier for FixedClassifier {
        fn predict(&self, _input: &Array4<f32>) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    /// Picks the class from the mean red value: bright images are class 1
    pub(crate) struct RednessClassifier;

    impl ImageClassifier for RednessClassifier {
        fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
            let red = input.index_axis(ndarray::Axis(3), 0);
            let mean = red.mean().unwrap_or(0.0);
            Ok(if mean > 127.0 { vec![0.1, 0.9] } else { vec![0.9, 0.1] })
        }
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), Some(0));
        assert_eq!(argmax(&[f32::NAN, 0.2, 0.1]), Some(1));
        assert_eq!(argmax(&[-3.0, -1.0]), Some(1));
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f32::NAN]), None);
    }

    #[test]
    fn test_missing_model_file() {
        let err = OnnxClassifier::load("model/does-not-exist.onnx", 1).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
