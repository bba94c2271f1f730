pub mod block_quote;
pub mod code_fence;
pub mod paragraph;

pub use block_quote::{BlockQuote, BlockQuoteParser};
pub use code_fence::{CodeFence, FenceSig, FencedCodeParser};
pub use paragraph::ParagraphParser;
