/// Configuration for Gemini API access.
///
/// A missing key is a fatal configuration error at startup, never a
/// per-request failure.
pub struct GeminiConfig {
    pub api_key: String,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .expect("GEMINI_API_KEY environment variable must be set");
        Self { api_key }
    }
}
