//! 入力文字列を 1 文字ずつ遷移させて受理判定する。
//!
//! 入力は遷移前にすべて検査する。'0'/'1' 以外が 1 文字でもあれば
//! `InvalidCharacter` を返し、走査は行わない。

use crate::error::DfaError;
use crate::builder::Graph;
use crate::state::{parse_bits, Bit, StateId};

/// 走査の 1 ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub bit: Bit,
    pub from: StateId,
    pub to: StateId,
}

/// 走査全体の記録
#[derive(Debug, Clone)]
pub struct TraceResult {
    pub steps: Vec<TraceStep>,
    pub final_state: StateId,
    pub accepted: bool,
}

impl TraceResult {
    /// 初期状態を含む訪問状態列
    pub fn visited(&self) -> impl Iterator<Item = StateId> + '_ {
        let first = self.steps.first().map_or(self.final_state, |s| s.from);
        std::iter::once(first).chain(self.steps.iter().map(|s| s.to))
    }
}

/// 状態 0 から bits をたどる。遷移は全域なので欠けることはない。
#[inline]
fn walk(graph: &Graph, bits: &[Bit], mut on_step: impl FnMut(TraceStep)) -> StateId {
    let mut current = graph.initial_state();
    for &bit in bits {
        let next = match graph.transition(current, bit) {
            Some(next) => next,
            None => unreachable!("state {} has no transition on {}", current, bit),
        };
        on_step(TraceStep { bit, from: current, to: next });
        current = next;
    }
    current
}

/// 入力を読み終えた状態を返す。
pub fn run(graph: &Graph, input: &str) -> Result<StateId, DfaError> {
    let bits = parse_bits(input)?;
    Ok(walk(graph, &bits, |_| {}))
}

/// 入力が受理されるか。空入力は状態 0 の受理判定（非受理）。
pub fn accept(graph: &Graph, input: &str) -> Result<bool, DfaError> {
    let state = run(graph, input)?;
    Ok(graph.is_accepting(state))
}

/// 訪問した状態をすべて記録しながら走査する。
pub fn trace(graph: &Graph, input: &str) -> Result<TraceResult, DfaError> {
    let bits = parse_bits(input)?;
    let mut steps = Vec::with_capacity(bits.len());
    let final_state = walk(graph, &bits, |step| steps.push(step));
    Ok(TraceResult {
        steps,
        final_state,
        accepted: graph.is_accepting(final_state),
    })
}
