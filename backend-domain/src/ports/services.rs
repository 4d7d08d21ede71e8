/// Unsupervised anomaly model.
///
/// Implementations fit from scratch on every call and keep no state between calls.
/// The returned scores line up with `samples`; lower means more anomalous.
pub trait AnomalyDetector: Send + Sync {
    fn fit_decision(&self, samples: &[Vec<f64>]) -> Vec<f64>;
}
