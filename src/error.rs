use thiserror::Error;

use crate::state::MAX_DEPTH;

/// 構築・受理判定・エクスポートのエラー
#[derive(Debug, Error)]
pub enum DfaError {
    /// depth が負、または状態数が StateId に収まらない
    #[error("invalid depth {depth}: must be in 0..={max}")]
    InvalidDepth { depth: i64, max: u32 },

    /// 入力に '0' / '1' 以外の文字が含まれる
    #[error("invalid character {ch:?} at position {position}: input must consist of '0' and '1'")]
    InvalidCharacter { ch: char, position: usize },

    /// DOT 書き出し時の I/O エラー
    #[error("failed to export graph: {0}")]
    Export(#[from] std::io::Error),
}

impl DfaError {
    pub(crate) fn invalid_depth(depth: i64) -> Self {
        DfaError::InvalidDepth { depth, max: MAX_DEPTH }
    }
}
