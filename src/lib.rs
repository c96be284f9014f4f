//! 「末尾 n ビットが全て 0 ではない」二進文字列を受理する DFA
//!
//! 深さ n の完全二分木（ヒープ番号付け）で長さ n 未満の接頭辞を表し、
//! 最下層の 2^n 状態を直近 n ビットの窓としてシフト遷移で閉じる。
//! 構築 [`build`]、受理判定 [`accept`]、DOT 書き出し [`dot`] を提供する。

pub mod acceptor;
pub mod builder;
pub mod classify;
pub mod dot;
pub mod error;
pub mod state;
pub mod verify;

pub use acceptor::{accept, run, trace, TraceResult, TraceStep};
pub use builder::{build, Edge, EdgeLabel, Graph, Node};
pub use classify::{accepts_closed_form, is_final_state, number_accepted, Shape};
pub use error::DfaError;
pub use state::{Bit, Layout, NodeId, StateId, MAX_DEPTH};
pub use verify::{verify_range, verify_range_parallel, verify_range_parallel_cancellable, VerifyResult};
