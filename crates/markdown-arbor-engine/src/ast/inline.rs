use serde::Serialize;

/// A text-flow (inline-level) Markdown node.
///
/// `Quoted` and `Latex` never come out of the parser; they are introduced by
/// the passes in [`crate::passes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    SoftBreak,
    LineBreak,
    /// A code span. Raw zone: the content is verbatim and never rescanned.
    Code(String),
    /// Raw inline HTML, verbatim.
    Html(String),
    Emphasis {
        children: Vec<Inline>,
    },
    Strong {
        children: Vec<Inline>,
    },
    Strikethrough {
        children: Vec<Inline>,
    },
    Link {
        destination: String,
        children: Vec<Inline>,
    },
    Image {
        source: String,
        children: Vec<Inline>,
    },
    /// A quoted span found by the quote-detection pass. The delimiters are
    /// kept inside the children, not stripped.
    Quoted {
        children: Vec<Inline>,
    },
    /// A LaTeX span found by the extraction pass, delimiters stripped.
    Latex {
        content: String,
        display: bool,
    },
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this node is a container whose children the rewrite
    /// infrastructure recurses into.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Emphasis { .. }
                | Self::Strong { .. }
                | Self::Strikethrough { .. }
                | Self::Link { .. }
                | Self::Image { .. }
                | Self::Quoted { .. }
        )
    }
}
