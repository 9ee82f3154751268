// src/services/inference_service.rs
// DOCUMENTATION: Image -> category pipeline
// PURPOSE: Preprocess, run the shared classifier, look up the label table

use image::RgbImage;
use rand::Rng;
use std::sync::Arc;

use crate::config::{Config, TensorLayout};
use crate::errors::AppError;
use crate::services::classifier::{argmax, ImageClassifier, OnnxClassifier};
use crate::services::label_table::LabelTable;
use crate::services::preprocess;

/// Result of classifying one upload
#[derive(Debug, Clone)]
pub struct Classification {
    pub index: usize,
    pub category: String,
    pub sentence: String,
    /// Square preview to store in the history
    pub preview: RgbImage,
}

/// Loaded once at startup and shared read-only by every worker
pub struct InferenceService {
    classifier: Arc<dyn ImageClassifier>,
    labels: LabelTable,
    preview_size: u32,
    input_size: u32,
    layout: TensorLayout,
    pixel_scale: f32,
}

impl InferenceService {
    pub fn new(classifier: Arc<dyn ImageClassifier>, labels: LabelTable, config: &Config) -> Self {
        Self {
            classifier,
            labels,
            preview_size: config.preview_size,
            input_size: config.model_input_size,
            layout: config.model_input_layout,
            pixel_scale: config.model_pixel_scale,
        }
    }

    /// Load the ONNX model and the label table named by the configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let labels = LabelTable::from_path(&config.labels_path)?;
        let classifier = OnnxClassifier::load(&config.model_path, config.inference_threads)?;
        Ok(Self::new(Arc::new(classifier), labels, config))
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Classify an upload with the thread-local RNG choosing the sentence
    /// DOCUMENTATION: CPU bound; call from a blocking context
    pub fn classify(&self, bytes: &[u8]) -> Result<Classification, AppError> {
        self.classify_with_rng(bytes, &mut rand::thread_rng())
    }

    pub fn classify_with_rng<R: Rng + ?Sized>(
        &self,
        bytes: &[u8],
        rng: &mut R,
    ) -> Result<Classification, AppError> {
        let prepared = preprocess::prepare(
            bytes,
            self.preview_size,
            self.input_size,
            self.layout,
            self.pixel_scale,
        )?;

        let scores = self.classifier.predict(&prepared.tensor).map_err(|e| {
            log::error!("Classifier failed: {:#}", e);
            AppError::InferenceError(e.to_string())
        })?;

        let index = argmax(&scores)
            .ok_or_else(|| AppError::InferenceError("classifier returned no scores".to_string()))?;

        let (category, sentence) = self.labels.describe(index, rng).ok_or_else(|| {
            log::error!(
                "Predicted class {} missing from label table ({} labels, {} scores)",
                index,
                self.labels.len(),
                scores.len()
            );
            AppError::InferenceError(format!("no label for class {}", index))
        })?;

        log::info!("Classified upload as {} (class {})", category, index);

        Ok(Classification {
            index,
            category: category.to_string(),
            sentence: sentence.to_string(),
            preview: prepared.preview,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::classifier::tests::{FixedClassifier, RednessClassifier};
    use crate::services::preprocess::tests::png_bytes;

    pub(crate) const LABELS: &str = r#"{
        "0": {"category": "forest", "sentence": ["Green and quiet.", "Tall trees everywhere."]},
        "1": {"category": "sunset beach", "sentence": ["Red sky over the water.", "Warm sand.", "Evening waves."]}
    }"#;

    pub(crate) fn service_with(classifier: Arc<dyn ImageClassifier>) -> InferenceService {
        let labels = LabelTable::from_json_str(LABELS).unwrap();
        InferenceService::new(classifier, labels, &Config::for_tests())
    }

    #[test]
    fn test_prediction_is_deterministic_and_sentence_is_a_candidate() {
        let service = service_with(Arc::new(RednessClassifier));
        let red = png_bytes(32, 20, [250, 10, 10]);
        let candidates = service.labels().get(1).unwrap().sentences.clone();

        for _ in 0..20 {
            let result = service.classify(&red).unwrap();
            assert_eq!(result.index, 1);
            assert_eq!(result.category, "sunset beach");
            assert!(candidates.contains(&result.sentence));
        }

        let dark = png_bytes(32, 20, [5, 80, 20]);
        assert_eq!(service.classify(&dark).unwrap().category, "forest");
    }

    #[test]
    fn test_preview_has_configured_size() {
        let service = service_with(Arc::new(FixedClassifier(vec![0.2, 0.8])));
        let result = service.classify(&png_bytes(50, 10, [1, 2, 3])).unwrap();
        let size = Config::for_tests().preview_size;
        assert_eq!(result.preview.dimensions(), (size, size));
    }

    #[test]
    fn test_corrupt_upload_is_invalid_image() {
        let service = service_with(Arc::new(FixedClassifier(vec![1.0])));
        assert!(matches!(
            service.classify(b"GIF89a-but-not-really"),
            Err(AppError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_unknown_class_is_inference_error() {
        let service = service_with(Arc::new(FixedClassifier(vec![0.0, 0.1, 0.9])));
        assert!(matches!(
            service.classify(&png_bytes(4, 4, [0, 0, 0])),
            Err(AppError::InferenceError(_))
        ));

        let empty = service_with(Arc::new(FixedClassifier(Vec::new())));
        assert!(matches!(
            empty.classify(&png_bytes(4, 4, [0, 0, 0])),
            Err(AppError::InferenceError(_))
        ));
    }
}
