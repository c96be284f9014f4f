//! 状態番号と深さのパラメータ。
//!
//! 木部分はヒープ番号付け（根=0, ビット0の子=2i+1, ビット1の子=2i+2）、
//! 最下層 `sum..total` は直近 depth ビットの窓を `sum` だけずらして表す。

use crate::error::DfaError;
use std::fmt;

/// 数値状態の番号
pub type StateId = u32;

/// 深さの上限。状態数 2^(depth+1)-1 が StateId に収まる最大値 (depth+1 < 32)。
///
/// 実際にはメモリが先に尽きる。depth=25 前後を超える場合は
/// [`crate::classify::accepts_closed_form`] を直接使うこと。
pub const MAX_DEPTH: u32 = StateId::BITS - 2;

/// グラフ上のノード。START は数値状態と衝突しない別タグ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Start,
    State(StateId),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Start => f.write_str("start"),
            NodeId::State(id) => write!(f, "q{}", id),
        }
    }
}

/// 入力記号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// 遷移表の列番号
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, char> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(other),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 入力文字列をビット列に変換する。'0' / '1' 以外があれば遷移前に失敗する。
/// position は文字のバイト位置。
pub fn parse_bits(input: &str) -> Result<Vec<Bit>, DfaError> {
    input
        .char_indices()
        .map(|(position, ch)| Bit::try_from(ch).map_err(|ch| DfaError::InvalidCharacter { ch, position }))
        .collect()
}

/// depth から決まる番号付けのパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub depth: u32,
    /// 最下層より上の状態数 = 2^depth - 1（最下層の先頭番号でもある）
    pub sum: StateId,
    /// 木全体の状態数 = 2^(depth+1) - 1
    pub total: StateId,
    /// 窓マスク = 2^depth - 1
    pub mask: StateId,
}

impl Layout {
    /// 符号付きの depth を検査してパラメータを計算する。
    pub fn new(depth: i64) -> Result<Self, DfaError> {
        if depth < 0 || depth > MAX_DEPTH as i64 {
            return Err(DfaError::invalid_depth(depth));
        }
        let depth = depth as u32;
        let sum = (1 << depth) - 1;
        Ok(Layout {
            depth,
            sum,
            total: (1 << (depth + 1)) - 1,
            mask: sum,
        })
    }

    /// 最下層の状態数 = 2^depth
    #[inline]
    pub fn leaf_count(&self) -> StateId {
        self.sum + 1
    }

    #[inline]
    pub fn is_leaf(&self, state: StateId) -> bool {
        state >= self.sum
    }

    #[inline]
    pub fn contains(&self, state: StateId) -> bool {
        state < self.total
    }

    /// 最下層の状態が表す窓の値
    #[inline]
    pub fn window(&self, state: StateId) -> StateId {
        (state - self.sum) & self.mask
    }
}
