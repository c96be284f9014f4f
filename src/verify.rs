use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::acceptor;
use crate::builder::Graph;
use crate::classify;

/// 範囲検証の結果
#[derive(Debug, Clone, Default)]
pub struct VerifyResult {
    /// 検証した値の総数
    pub total_checked: u64,
    /// 受理された数
    pub accepted: u64,
    /// 拒否された数
    pub rejected: u64,
    /// DFA の判定と (val & mask) != 0 が食い違った値
    pub mismatches: Vec<u64>,
    /// 全て一致したか
    pub all_matched: bool,
}

impl VerifyResult {
    fn empty() -> Self {
        VerifyResult { all_matched: true, ..Default::default() }
    }

    fn merge(&mut self, other: VerifyResult) {
        self.total_checked += other.total_checked;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.mismatches.extend(other.mismatches);
        self.all_matched = self.mismatches.is_empty();
    }
}

/// val の二進表記を DFA に通し、期待値と比べる。
/// 二進表記は '0'/'1' のみなので acceptor がエラーを返すことはない。
#[inline]
fn check_value(graph: &Graph, val: u64, out: &mut VerifyResult) {
    let expected = classify::value_accepted(val, graph.layout());
    let got = acceptor::accept(graph, &format!("{:b}", val)).unwrap_or(!expected);
    if got {
        out.accepted += 1;
    } else {
        out.rejected += 1;
    }
    if got != expected {
        out.mismatches.push(val);
    }
    out.total_checked += 1;
}

/// [start, end] の全整数を検証する（シングルスレッド版）。
/// progress_callback: (完了数, 総数) を定期的に呼ぶ。
pub fn verify_range(
    graph: &Graph,
    start: u64,
    end: u64,
    progress_callback: impl Fn(u64, u64),
) -> VerifyResult {
    let mut result = VerifyResult::empty();
    if start > end {
        return result;
    }
    let total = (end - start).saturating_add(1);

    for val in start..=end {
        check_value(graph, val, &mut result);
        if result.total_checked % 1000 == 0 {
            progress_callback(result.total_checked, total);
        }
    }

    progress_callback(result.total_checked, total);
    result.all_matched = result.mismatches.is_empty();
    result
}

/// [start, end] の全整数を検証する（並列版）。
/// Rayon でチャンク分割して並列処理。グラフは全スレッドで共有（読み取りのみ）。
/// progress_callback: (完了数, 総数) を定期的に呼ぶ（スレッドセーフ）。
pub fn verify_range_parallel(
    graph: &Graph,
    start: u64,
    end: u64,
    progress_callback: impl Fn(u64, u64) + Sync,
) -> VerifyResult {
    let cancel = AtomicBool::new(false);
    verify_range_parallel_cancellable(graph, start, end, &cancel, progress_callback)
}

/// キャンセル可能な並列検証。cancel が true になると途中結果を返す。
pub fn verify_range_parallel_cancellable(
    graph: &Graph,
    start: u64,
    end: u64,
    cancel: &AtomicBool,
    progress_callback: impl Fn(u64, u64) + Sync,
) -> VerifyResult {
    if start > end {
        return VerifyResult::empty();
    }
    let total = (end - start).saturating_add(1);

    // チャンク分割: 各チャンク10000個
    let chunk_size: u64 = 10000;
    let num_chunks = total.div_ceil(chunk_size);

    let global_done = AtomicU64::new(0);
    let global_result = Mutex::new(VerifyResult::empty());

    (0..num_chunks).into_par_iter().for_each(|chunk_idx| {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let chunk_start = start + chunk_idx * chunk_size;
        let chunk_end = std::cmp::min(chunk_start.saturating_add(chunk_size - 1), end);

        let mut local = VerifyResult::empty();
        let mut unreported = 0u64;

        let mut val = chunk_start;
        loop {
            check_value(graph, val, &mut local);
            unreported += 1;

            // チャンク内でも定期的に進捗報告
            if unreported >= 1000 {
                let done = global_done.fetch_add(unreported, Ordering::Relaxed) + unreported;
                progress_callback(done, total);
                unreported = 0;
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
            }
            if val == chunk_end {
                break;
            }
            val += 1;
        }

        if unreported > 0 {
            let done = global_done.fetch_add(unreported, Ordering::Relaxed) + unreported;
            progress_callback(done, total);
        }

        // 他スレッドが panic しても集計は続ける
        let mut guard = match global_result.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.merge(local);
    });

    let mut result = match global_result.into_inner() {
        Ok(r) => r,
        Err(poisoned) => poisoned.into_inner(),
    };
    result.mismatches.sort_unstable();
    result.all_matched = result.mismatches.is_empty();
    result
}
