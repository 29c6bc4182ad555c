#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn delimiter(self) -> char {
        match self {
            Self::Backticks => '`',
            Self::Tildes => '~',
        }
    }
}

/// An open code fence: everything needed to match its closing line and to
/// strip indentation from the enclosed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    pub kind: FenceKind,
    pub length: usize,
    pub indent: usize,
    /// The info string, captured verbatim (trimmed) from the opening line.
    pub info: String,
}

/// Fenced code block syntax.
pub struct CodeFence;

impl CodeFence {
    /// Recognizes a fence opener: up to three spaces of indentation, then a
    /// run of at least three backticks or tildes. A backtick info string may
    /// not itself contain a backtick.
    pub fn open(line: &str) -> Option<Fence> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let delim = rest.chars().next()?;
        let kind = match delim {
            '`' => FenceKind::Backticks,
            '~' => FenceKind::Tildes,
            _ => return None,
        };
        let length = rest.chars().take_while(|&c| c == delim).count();
        if length < 3 {
            return None;
        }
        let info = rest[length..].trim().to_string();
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(Fence {
            kind,
            length,
            indent,
            info,
        })
    }

    /// Whether `line` closes `fence`: a run of the same delimiter at least
    /// as long as the opener, with nothing else on the line.
    pub fn closes(fence: &Fence, line: &str) -> bool {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return false;
        }
        let rest = line.trim();
        let delim = fence.kind.delimiter();
        let length = rest.chars().take_while(|&c| c == delim).count();
        length >= fence.length && rest.chars().all(|c| c == delim)
    }
}
