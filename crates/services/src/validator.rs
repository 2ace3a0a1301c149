//! `StubImageValidator` — a mock CV model.
//!
//! Reproduces the shape and latency of a real inference call (a fixed
//! processing delay, a classification, a confidence score) without any
//! actual model behind it.  The real integration point would be a Python
//! microservice or an ONNX runtime.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::info;

use crate::traits::{ImageAnalysis, ImageValidator};
use crate::ServiceError;

/// Simulated inference latency.
const PROCESSING_DELAY: Duration = Duration::from_millis(500);

/// A validator that sleeps for [`PROCESSING_DELAY`] and returns a random
/// Pothole/Garbage label with confidence in `0.85..0.95`.
#[derive(Debug, Clone, Default)]
pub struct StubImageValidator;

#[async_trait]
impl ImageValidator for StubImageValidator {
    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis, ServiceError> {
        info!("Analyzing image: {image_url}");

        tokio::time::sleep(PROCESSING_DELAY).await;

        let (is_pothole, confidence) = {
            let mut rng = rand::thread_rng();
            (rng.gen::<f64>() > 0.3, 0.85 + rng.gen::<f64>() * 0.1)
        };

        Ok(ImageAnalysis {
            valid: true,
            category: if is_pothole { "Pothole" } else { "Garbage" }.to_string(),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn analysis_is_valid_with_bounded_confidence() {
        let validator = StubImageValidator;
        let analysis = validator
            .analyze("https://example.com/pothole.jpg")
            .await
            .expect("stub never fails");

        assert!(analysis.valid);
        assert!(analysis.category == "Pothole" || analysis.category == "Garbage");
        assert!((0.85..0.95).contains(&analysis.confidence));
    }
}
