//! External model collaborators.
//!
//! The engine only consumes these through the [`Summarizer`] and [`Embedder`]
//! traits; the concrete adapters here talk to a llama.cpp server and to a local
//! fastembed model.

pub mod embedder;
pub mod summarizer;
pub mod traits;

pub use embedder::FastEmbedder;
pub use summarizer::LlamaSummarizer;
pub use traits::{Embedder, LengthBounds, Summarizer};
