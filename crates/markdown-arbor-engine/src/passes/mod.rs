//! # Extension Passes
//!
//! Pure inline-to-inline rewrites built on [`crate::rewrite`]:
//!
//! - [`latex::extract_latex`]: pulls `\(...\)` / `\[...\]` spans out of text
//!   leaves into [`crate::ast::Inline::Latex`] nodes.
//! - [`quotes::parse_quotes`]: wraps delimited quotations in
//!   [`crate::ast::Inline::Quoted`] nodes.
//!
//! Both passes scan only `Text` leaves (`Code` and `Html` content is
//! verbatim), recurse through composite nodes, and degrade unmatched
//! delimiters to literal text. Each is idempotent on text without matches.

pub mod latex;
pub mod quotes;

pub use latex::extract_latex;
pub use quotes::parse_quotes;
