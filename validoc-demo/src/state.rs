/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Probability in `[0, 1]` that a prediction is rejected with 403.
    pub reject_rate: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self { reject_rate: 0.5 }
    }
}
