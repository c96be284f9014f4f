use clap::Parser;
use lastn_dfa::*;
use num_bigint::BigUint;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dot { depth, output, stdout } => cmd_dot(depth, output, stdout),
        Commands::Accept { depth, input, closed_form } => cmd_accept(depth, &input, closed_form),
        Commands::Number { depth, n } => cmd_number(depth, &n),
        Commands::Trace { depth, input } => cmd_trace(depth, &input),
        Commands::Verify { depth, start, end, serial } => cmd_verify(depth, start, end, serial),
    };

    if let Err(e) = result {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

fn parse_n(s: &str) -> BigUint {
    BigUint::from_str(s).unwrap_or_else(|_| {
        eprintln!("数値を解析できません: {}", s);
        std::process::exit(1);
    })
}

fn build_timed(depth: i64) -> Result<Graph, DfaError> {
    let timer = Instant::now();
    let graph = build(depth)?;
    eprintln!(
        "構築: depth={}, 状態数={}, 辺数={} ({:?})",
        graph.depth(),
        graph.state_count(),
        graph.edge_count(),
        timer.elapsed()
    );
    Ok(graph)
}

fn verdict(accepted: bool) -> &'static str {
    if accepted { "受理" } else { "拒否" }
}

fn cmd_dot(depth: i64, output: Option<PathBuf>, stdout: bool) -> Result<(), DfaError> {
    let graph = build_timed(depth)?;

    if stdout {
        let out = io::stdout();
        return dot::write_dot(&graph, io::BufWriter::new(out.lock()));
    }

    let path = output.unwrap_or_else(|| PathBuf::from(format!("DFA-{}.dot", graph.depth())));
    dot::export_to_file(&graph, &path)?;
    println!("保存: {}", path.display());
    Ok(())
}

fn cmd_accept(depth: i64, input: &str, closed_form: bool) -> Result<(), DfaError> {
    let accepted = if closed_form {
        accepts_closed_form(input, depth)?
    } else {
        let graph = build_timed(depth)?;
        let state = run(&graph, input)?;
        println!("終状態 = q{}", state);
        graph.is_accepting(state)
    };
    println!("入力長 = {}", input.len());
    println!("判定 = {}", verdict(accepted));
    Ok(())
}

fn cmd_number(depth: i64, n: &str) -> Result<(), DfaError> {
    let n = parse_n(n);
    let graph = build_timed(depth)?;
    let bits = n.to_str_radix(2);

    let accepted = accept(&graph, &bits)?;
    let expected = number_accepted(&n, graph.depth() as u64);

    println!("n = {}", n);
    println!("二進 = {}", if bits.len() <= 80 { bits.clone() } else { format!("...{}", &bits[bits.len() - 77..]) });
    println!("ビット長 = {}", bits.len());
    println!("末尾ゼロ数 = {}", n.trailing_zeros().unwrap_or(0));
    println!("判定 = {}", verdict(accepted));
    if accepted != expected {
        eprintln!("警告: 閉形式の判定 ({}) と一致しません", verdict(expected));
    }
    Ok(())
}

fn cmd_trace(depth: i64, input: &str) -> Result<(), DfaError> {
    let graph = build_timed(depth)?;
    let result = trace(&graph, input)?;

    let show_limit = 50;
    println!("  {:>6}  {:>3}  {:>12}  {:>12}", "step", "bit", "from", "to");
    for (i, step) in result.steps.iter().enumerate() {
        if i < show_limit || i >= result.steps.len().saturating_sub(5) {
            println!(
                "  {:>6}  {:>3}  {:>12}  {:>12}{}",
                i + 1,
                step.bit,
                NodeId::State(step.from),
                NodeId::State(step.to),
                if graph.is_accepting(step.to) { " *" } else { "" }
            );
        } else if i == show_limit {
            println!("  ... ({} ステップ省略) ...", result.steps.len().saturating_sub(show_limit + 5));
        }
    }

    let layout = graph.layout();
    println!();
    println!("--- 結果 ---");
    println!("ステップ数 = {}", result.steps.len());
    println!("終状態     = q{}", result.final_state);
    if layout.is_leaf(result.final_state) {
        println!(
            "窓         = {:0width$b}",
            layout.window(result.final_state),
            width = layout.depth as usize
        );
    } else {
        println!("窓         = (長さ {} 未満)", layout.depth);
    }
    println!("判定       = {}", verdict(result.accepted));
    Ok(())
}

fn cmd_verify(depth: i64, start: u64, end: u64, serial: bool) -> Result<(), DfaError> {
    let graph = build_timed(depth)?;

    let num_threads = if serial { 1 } else { rayon::current_num_threads() };
    println!("範囲検証: [{}, {}], depth={}", start, end, graph.depth());
    println!("(期待値: (val & (2^{} - 1)) != 0、{}スレッド)", graph.depth(), num_threads);
    println!();

    let timer = Instant::now();
    let last_print = std::sync::Mutex::new(Instant::now());
    let progress = |done: u64, total: u64| {
        if total == 0 {
            return;
        }
        let now = Instant::now();
        if let Ok(mut lp) = last_print.try_lock() {
            if now.duration_since(*lp).as_millis() >= 500 {
                let elapsed = timer.elapsed();
                let pct = done as f64 / total as f64 * 100.0;
                let vps = done as f64 / elapsed.as_secs_f64();
                eprint!(
                    "\x1b[2K\r  [{:.1}s] {}/{} ({:.1}%) | {:.0} vals/s",
                    elapsed.as_secs_f64(), done, total, pct, vps
                );
                io::stderr().flush().ok();
                *lp = now;
            }
        }
    };

    let result = if serial {
        verify_range(&graph, start, end, progress)
    } else {
        verify_range_parallel(&graph, start, end, progress)
    };
    let elapsed = timer.elapsed();
    eprintln!();

    println!("--- 結果 ---");
    println!("検証した値の数 = {}", result.total_checked);
    println!("受理           = {}", result.accepted);
    println!("拒否           = {}", result.rejected);
    println!("全て一致       = {}", if result.all_matched { "はい" } else { "いいえ" });
    println!("計算時間       = {:?}", elapsed);

    if !result.mismatches.is_empty() {
        println!("不一致         = {} 個", result.mismatches.len());
        for v in &result.mismatches[..result.mismatches.len().min(10)] {
            println!("  {} ({:b})", v, v);
        }
    }
    Ok(())
}
