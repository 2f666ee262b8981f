//! External collaborators: a text-generation model and a web search API.
//!
//! The core only sees the two object-safe traits, [`GenerationProvider`] and
//! [`SearchProvider`]. Concrete adapters talk to Gemini and Serper over
//! HTTP; tests substitute scripted fakes.
//!
//! ```text
//! plan::generate / plan::expand ──complete(prompt)──> dyn GenerationProvider ──> GeminiClient
//! resolver::ResourceResolver ────query(term, n)────> dyn SearchProvider ─────> SerperClient
//! ```

pub mod gemini;
pub mod serper;
pub mod trait_def;
pub mod types;

pub use gemini::GeminiClient;
pub use serper::SerperClient;
pub use trait_def::{GenerationProvider, SearchProvider};
pub use types::{ProviderError, SearchHit};
