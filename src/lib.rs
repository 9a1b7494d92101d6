//! # lexeme-render
//!
//! Display-side text helpers for a lexicographic database: wiki-style markup
//! to HTML, bolding that survives pipe-linked wikilinks, Roman-numeral
//! homograph citations, and headword lists joined as sentences.
//!
//! Every rendering function is pure; locale messages are passed in
//! explicitly as a [`Locale`].
pub mod batch;
pub mod bolding;
pub mod error;
pub mod headword;
pub mod links;
pub mod locale;
pub mod markup;
pub mod roman;
pub mod summary;

// Re-export the main entry points for convenience
pub use bolding::{bold, escape_for_bolding};
pub use error::{RenderError, Result};
pub use headword::{title_at, title_for, GroupSlot, Lexeme};
pub use locale::{Locale, LocaleCatalog};
pub use markup::{escape_html, translate, Token};
pub use roman::romanize;
pub use summary::summarize;
