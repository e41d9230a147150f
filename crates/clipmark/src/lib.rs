//! # clipmark
//!
//! Convert a selected fragment of a rendered course page to Markdown.
//!
//! The converter works on a detached, CDP-style [`Node`] tree: a copy of the
//! user's selection. Besides ordinary prose (headings, lists, tables, code,
//! links, images) it understands the widgets found on course platforms:
//!
//! - **Math**: MathJax 2/3 and KaTeX output turns back into `$...$` and
//!   `$$...$$` TeX.
//! - **Multiple choice**: option groups become task lists.
//! - **Editors**: Ace editor widgets become fenced code blocks, with the
//!   language inferred from the file name.
//! - **Form controls**: inputs and buttons are dropped.
//!
//! Text outside math and generated markup has `*`, `_` and backticks
//! escaped.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use clipmark::{ConvertService, Node};
//!
//! let service = ConvertService::new();
//!
//! let selection = Node::document_fragment()
//!     .with_child(Node::element("h2").with_child(Node::text("Problem 1")))
//!     .with_child(Node::element("p").with_child(Node::text("Compute x_1.")));
//!
//! let markdown = service.convert(&selection);
//! assert_eq!(markdown, "## Problem 1\n\nCompute x\\_1.\n");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use clipmark::ConvertService;
//!
//! let service = ConvertService::new();
//! let markdown = service
//!     .convert_html(r#"<p>Area is <mjx-container><mjx-math data-latex="\pi r^2"></mjx-math></mjx-container>.</p>"#)
//!     .unwrap();
//! assert_eq!(markdown, "Area is $\\pi r^2$.\n");
//! ```

pub mod choice;
pub mod context;
pub mod convert;
pub mod escape;
#[cfg(feature = "html")]
pub mod html;
pub mod math;
pub mod node;
pub mod normalize;
mod options;
mod rules;
mod service;
mod utilities;

pub use context::{Context, ListFrame, ListKind};
pub use convert::Converter;
pub use escape::escape;
#[cfg(feature = "html")]
pub use html::parse_html;
pub use math::MathSpan;
pub use node::{Node, NodeType};
pub use normalize::normalize;
pub use options::{ChoiceOptions, Options};
pub use rules::{language_from_filename, Filter, Rule, Rules, TableMatrix};
pub use service::ConvertService;
pub use utilities::*;

/// Error type for clipmark operations
#[derive(Debug, thiserror::Error)]
pub enum ClipmarkError {
    #[error("nothing to convert: the selection is empty")]
    EmptySelection,

    #[error("nothing to convert: the selection has no convertible content")]
    EmptyOutput,

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClipmarkError>;
