//! Document sources and sinks for docgen.
//!
//! - [`source`]: resolve a designator (literal text, local path, Google URL) to text
//! - [`extract`]: plain text from local `.txt`/`.md`/`.docx`/`.pdf` files
//! - [`store`]: the hosted-storage seam and its lazily connected handle
//! - [`google`]: Google OAuth, Docs and Drive adapter
//! - [`format`]: Markdown to Google Docs paragraph-style requests

pub mod extract;
pub mod format;
pub mod google;
pub mod source;
pub mod store;

pub use extract::read_local_file;
pub use format::{format_markdown, FormattedDocument, ParagraphKind, StyledRange};
pub use google::{extract_id, GoogleAuth, GoogleDrive};
pub use source::{expand_home, is_hosted, looks_like_location, SourceReader};
pub use store::{DocumentStore, LazyStore};
