//! 受理状態の判定と、グラフを作らずに済む閉形式の判定。
//!
//! 上位状態 (val < sum) は「val+1 が 2 の冪でなければ受理」。
//! val+1 = 2^k + v (k = 読んだビット数, v = その値) なので、
//! これは「ここまでに 1 を読んだか」と同じ。根 (val=0) は非受理。
//!
//! 最下層 (val >= sum) は窓 (val-sum) & mask が 0 でなければ受理。
//!
//! 二つを合わせると受理言語は「末尾 min(長さ, depth) ビットに 1 を含む」。

use num_bigint::BigUint;

use crate::error::DfaError;
use crate::state::{parse_bits, Bit, Layout, NodeId, StateId};

/// 可視化用のノード形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Point,
    Circle,
    DoubleCircle,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Point => "point",
            Shape::Circle => "circle",
            Shape::DoubleCircle => "doublecircle",
        }
    }
}

/// 数値状態 val が受理状態か
#[inline]
pub fn is_final_state(layout: &Layout, val: StateId) -> bool {
    if val < layout.sum {
        // 長さ depth 未満の接頭辞。左端 (全ビット 0) のときだけ非受理
        !(val + 1).is_power_of_two()
    } else {
        layout.window(val) != 0
    }
}

/// ノード形状。START は point、受理状態は doublecircle。
pub fn shape(layout: &Layout, node: NodeId) -> Shape {
    match node {
        NodeId::Start => Shape::Point,
        NodeId::State(val) if is_final_state(layout, val) => Shape::DoubleCircle,
        NodeId::State(_) => Shape::Circle,
    }
}

/// グラフを構築せずに受理判定する。
///
/// 結果は `accept(&build(depth)?, input)` と一致するが、depth は
/// [`crate::state::MAX_DEPTH`] に縛られない。
pub fn accepts_closed_form(input: &str, depth: i64) -> Result<bool, DfaError> {
    if depth < 0 {
        return Err(DfaError::invalid_depth(depth));
    }
    let bits = parse_bits(input)?;
    let k = bits.len().min(usize::try_from(depth).unwrap_or(usize::MAX));
    Ok(bits[bits.len() - k..].contains(&Bit::One))
}

/// 数値 n の二進表記（先頭ゼロなし、0 は "0"）を入力としたときの受理判定。
/// 末尾ゼロ数が depth 未満なら受理。
pub fn number_accepted(n: &BigUint, depth: u64) -> bool {
    match n.trailing_zeros() {
        Some(tz) => tz < depth,
        None => false,
    }
}

/// 上と同じ判定の u64 版 (検証表の期待値)
#[inline]
pub fn value_accepted(val: u64, layout: &Layout) -> bool {
    (val & layout.mask as u64) != 0
}
