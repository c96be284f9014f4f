//! 末尾 depth ビット判定 DFA の構築。
//!
//! 状態 0..sum は深さ depth の完全二分木（ヒープ番号付け）、
//! 状態 sum..total は直近 depth ビットの窓で、窓を左シフトして
//! 新しいビットを入れる遷移で閉じた 2^depth 状態のサイクルをなす。
//! START ノードは可視化用の入口で、遷移表には含めない。

use std::iter;

use crate::classify::{self, Shape};
use crate::error::DfaError;
use crate::state::{Bit, Layout, NodeId, StateId};

/// 辺ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    /// START → 0 の辺
    Start,
    Bit(Bit),
}

impl EdgeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeLabel::Start => "start",
            EdgeLabel::Bit(Bit::Zero) => "0",
            EdgeLabel::Bit(Bit::One) => "1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub label: EdgeLabel,
}

/// 構築済みの DFA。構築後は不変で、複数スレッドから同時に読んでよい。
#[derive(Debug, Clone)]
pub struct Graph {
    layout: Layout,
    /// transitions[state][bit] = 遷移先
    transitions: Vec<[StateId; 2]>,
}

/// depth からグラフを構築する。
///
/// 時間・空間とも O(2^depth)。depth < 0 または depth > MAX_DEPTH は
/// `InvalidDepth` で、部分的なグラフは返さない。
pub fn build(depth: i64) -> Result<Graph, DfaError> {
    let layout = Layout::new(depth)?;
    let mut transitions = vec![[0 as StateId; 2]; layout.total as usize];

    // 木部分: i → 2i+1 (0), 2i+2 (1)
    for i in 0..layout.total / 2 {
        transitions[i as usize] = [2 * i + 1, 2 * i + 2];
    }

    // 最下層: 窓を 1 ビット左シフトして新ビットを入れる
    for i in 0..layout.leaf_count() {
        let source = i + layout.sum;
        let sink_zero = ((i << 1) & layout.mask) + layout.sum;
        let sink_one = (((i << 1) + 1) & layout.mask) + layout.sum;
        transitions[source as usize] = [sink_zero, sink_one];
    }

    Ok(Graph { layout, transitions })
}

impl Graph {
    pub fn depth(&self) -> u32 {
        self.layout.depth
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// 数値状態の数 (START を除く) = 2^(depth+1) - 1
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// START を含むノード数
    pub fn node_count(&self) -> usize {
        self.state_count() + 1
    }

    /// START 辺を含む辺数
    pub fn edge_count(&self) -> usize {
        self.state_count() * 2 + 1
    }

    /// 長さ depth 未満の接頭辞を表す状態の数
    pub fn upper_state_count(&self) -> usize {
        self.layout.sum as usize
    }

    /// 初期状態（START ではなく状態 0）
    pub fn initial_state(&self) -> StateId {
        0
    }

    /// O(1) の遷移。state が範囲外なら None。
    #[inline]
    pub fn transition(&self, state: StateId, bit: Bit) -> Option<StateId> {
        self.transitions.get(state as usize).map(|t| t[bit.index()])
    }

    #[inline]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.layout.contains(state) && classify::is_final_state(&self.layout, state)
    }

    pub fn shape(&self, node: NodeId) -> Shape {
        classify::shape(&self.layout, node)
    }

    /// START, 0, 1, ..., total-1 の順
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        iter::once(NodeId::Start)
            .chain((0..self.layout.total).map(NodeId::State))
            .map(move |id| Node { id, shape: self.shape(id) })
    }

    /// START → 0 の後、状態順に各状態の 0 辺, 1 辺
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let start = Edge {
            source: NodeId::Start,
            target: NodeId::State(self.initial_state()),
            label: EdgeLabel::Start,
        };
        let labeled = self.transitions.iter().enumerate().flat_map(|(source, targets)| {
            Bit::ALL.into_iter().map(move |bit| Edge {
                source: NodeId::State(source as StateId),
                target: NodeId::State(targets[bit.index()]),
                label: EdgeLabel::Bit(bit),
            })
        });
        iter::once(start).chain(labeled)
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.layout.total).filter(move |&s| classify::is_final_state(&self.layout, s))
    }
}
