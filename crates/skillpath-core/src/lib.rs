//! Core of skillpath: turns a learning topic into a 7-day curriculum and
//! enriches each day with curated web resources.
//!
//! ```text
//! topic ──> plan::generate ──> provider::GenerationProvider
//!   │             │
//!   │             └─> plan::parser (fences, bracket scan, shape checks)
//!   │
//!   └──> curator::Curator ──> resolver::ResourceResolver ──> provider::SearchProvider
//! ```

pub mod config;
pub mod curator;
pub mod error;
pub mod model;
pub mod plan;
pub mod provider;
pub mod resolver;

pub use config::{CurationConfig, Credential, GeminiConfig, SerperConfig};
pub use curator::Curator;
pub use error::{CurationError, FieldError, ValidationError};
pub use model::{DayPlan, DetailedDayPlan, DifficultyLevel, Plan, Resource, ResourceKind, Topic};
pub use provider::{GenerationProvider, ProviderError, SearchHit, SearchProvider};
pub use resolver::{ResolveResources, ResourceResolver};
