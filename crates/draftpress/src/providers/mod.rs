// Provider adapters — one module per vendor behind the ArticleGenerator trait.

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicGenerator;
pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;
