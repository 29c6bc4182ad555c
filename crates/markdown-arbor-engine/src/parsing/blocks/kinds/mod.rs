pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod html_block;
pub mod list_marker;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, Fence, FenceKind};
pub use heading::AtxHeading;
pub use html_block::HtmlBlockStart;
pub use list_marker::{ListMarker, MarkerKind, TaskMarker};
pub use table::PipeTable;
pub use thematic_break::ThematicBreak;
