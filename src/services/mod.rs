//! 业务能力层（Services）
//!
//! 描述"我能做什么"，每个能力只处理一张工作表或一组错题。

pub mod aggregator;
pub mod extractor;
pub mod roster;

pub use aggregator::{aggregate, highlight_threshold, mark_highlights, sort_question_ids};
pub use extractor::Extractor;
pub use roster::roster;
