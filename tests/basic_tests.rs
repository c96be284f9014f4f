use lastn_dfa::*;
use std::collections::HashMap;

/// 各数値状態の (0 辺の数, 1 辺の数)
fn out_degrees(graph: &Graph) -> HashMap<StateId, (usize, usize)> {
    let mut deg: HashMap<StateId, (usize, usize)> = HashMap::new();
    for edge in graph.edges() {
        let NodeId::State(src) = edge.source else {
            continue;
        };
        let entry = deg.entry(src).or_default();
        match edge.label {
            EdgeLabel::Bit(Bit::Zero) => entry.0 += 1,
            EdgeLabel::Bit(Bit::One) => entry.1 += 1,
            EdgeLabel::Start => panic!("start label on a numeric edge: {:?}", edge),
        }
    }
    deg
}

// ===== 構造 =====

#[test]
fn test_structure_counts() {
    for depth in 0..=10i64 {
        let g = build(depth).unwrap();
        let total = (1usize << (depth + 1)) - 1;

        assert_eq!(g.nodes().count(), 1usize << (depth + 1), "nodes for depth={}", depth);
        let starts = g.nodes().filter(|n| n.id == NodeId::Start).count();
        assert_eq!(starts, 1);

        let edges: Vec<Edge> = g.edges().collect();
        let labeled = edges.iter().filter(|e| matches!(e.label, EdgeLabel::Bit(_))).count();
        let start_edges: Vec<&Edge> = edges.iter().filter(|e| e.label == EdgeLabel::Start).collect();
        assert_eq!(labeled, 2 * total);
        assert_eq!(start_edges.len(), 1);
        assert_eq!(start_edges[0].source, NodeId::Start);
        assert_eq!(start_edges[0].target, NodeId::State(0));
    }
}

#[test]
fn test_out_degree_two_one_per_bit() {
    for depth in 0..=8 {
        let g = build(depth).unwrap();
        let deg = out_degrees(&g);
        assert_eq!(deg.len(), g.state_count());
        for (state, d) in deg {
            assert_eq!(d, (1, 1), "state {} at depth {}", state, depth);
        }
    }
}

#[test]
fn test_tree_is_heap_indexed() {
    let g = build(6).unwrap();
    for i in 0..g.upper_state_count() as StateId {
        assert_eq!(g.transition(i, Bit::Zero), Some(2 * i + 1));
        assert_eq!(g.transition(i, Bit::One), Some(2 * i + 2));
    }
}

#[test]
fn test_leaf_shift_transitions() {
    let g = build(4).unwrap();
    let l = *g.layout();
    for w in 0..l.leaf_count() {
        let s = w + l.sum;
        assert_eq!(g.transition(s, Bit::Zero), Some(((w << 1) & l.mask) + l.sum));
        assert_eq!(g.transition(s, Bit::One), Some((((w << 1) | 1) & l.mask) + l.sum));
    }
}

#[test]
fn test_every_state_reachable() {
    // 全状態が状態 0 から到達可能
    let g = build(5).unwrap();
    let mut seen = vec![false; g.state_count()];
    let mut stack = vec![g.initial_state()];
    while let Some(s) = stack.pop() {
        if std::mem::replace(&mut seen[s as usize], true) {
            continue;
        }
        for bit in Bit::ALL {
            stack.push(g.transition(s, bit).unwrap());
        }
    }
    assert!(seen.iter().all(|&v| v));
}

#[test]
fn test_accepting_shapes_agree() {
    let g = build(5).unwrap();
    for node in g.nodes() {
        match node.id {
            NodeId::Start => assert_eq!(node.shape, Shape::Point),
            NodeId::State(s) if g.is_accepting(s) => assert_eq!(node.shape, Shape::DoubleCircle),
            NodeId::State(_) => assert_eq!(node.shape, Shape::Circle),
        }
    }
}

// ===== 受理判定 =====

#[test]
fn test_depth10_scenarios() {
    let g = build(10).unwrap();

    let one = format!("{}1", "0".repeat(64));
    assert_eq!(one.len(), 65);
    assert!(accept(&g, &one).unwrap());

    let zeros = format!("1{}", "0".repeat(10));
    assert!(!accept(&g, &zeros).unwrap());

    // 空入力 = 根 (非受理)
    assert!(!accept(&g, "").unwrap());
    assert!(!g.is_accepting(0));
}

#[test]
fn test_upper_states_accept_once_a_one_is_read() {
    let g = build(10).unwrap();
    assert!(!accept(&g, "0").unwrap());
    assert!(!accept(&g, "000000000").unwrap());
    assert!(accept(&g, "000001000").unwrap());
    assert!(accept(&g, "1").unwrap());
}

#[test]
fn test_invalid_character() {
    let g = build(10).unwrap();
    let err = accept(&g, "0012").unwrap_err();
    assert!(matches!(err, DfaError::InvalidCharacter { ch: '2', position: 3 }));
    assert!(matches!(accept(&g, "x"), Err(DfaError::InvalidCharacter { ch: 'x', .. })));
}

#[test]
fn test_invalid_depth() {
    assert!(matches!(build(-1), Err(DfaError::InvalidDepth { depth: -1, .. })));
    assert!(matches!(build(i64::MIN), Err(DfaError::InvalidDepth { .. })));
    assert!(matches!(build(MAX_DEPTH as i64 + 1), Err(DfaError::InvalidDepth { .. })));
}

#[test]
fn test_deterministic() {
    let g = build(7).unwrap();
    let input = "1011001110001011";
    let a = accept(&g, input).unwrap();
    let b = accept(&g, input).unwrap();
    assert_eq!(a, b);
    assert_eq!(run(&g, input).unwrap(), run(&g, input).unwrap());
}

#[test]
fn test_trace_ends_where_run_ends() {
    let g = build(4).unwrap();
    for input in ["", "1", "0000", "10000", "110101", "0001000"] {
        let t = trace(&g, input).unwrap();
        assert_eq!(t.steps.len(), input.len());
        assert_eq!(t.final_state, run(&g, input).unwrap());
        assert_eq!(t.accepted, accept(&g, input).unwrap());
        for pair in t.steps.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }
}

#[test]
fn test_graph_shared_across_threads() {
    let g = build(8).unwrap();
    std::thread::scope(|s| {
        for t in 0..4u64 {
            let g = &g;
            s.spawn(move || {
                for v in (t * 1000)..(t * 1000 + 1000) {
                    let got = accept(g, &format!("{:b}", v)).unwrap();
                    assert_eq!(got, v & 0xff != 0, "v={}", v);
                }
            });
        }
    });
}

// ===== DOT =====

#[test]
fn test_dot_export_labels() {
    let g = build(3).unwrap();
    let text = dot::to_dot_string(&g);
    assert!(text.starts_with("digraph G {\n"));
    assert!(text.ends_with("}\n"));
    assert!(text.contains("  start [ label=\"start\" shape=\"point\" ];\n"));
    assert!(text.contains("  start -> q0 [ label=\"start\" ];\n"));
    assert!(text.contains("  q14 [ label=\"q14\" shape=\"doublecircle\" ];\n"));
    assert!(text.contains("  q7 [ label=\"q7\" shape=\"circle\" ];\n"));
    // 窓 111 → 0 で 110
    assert!(text.contains("  q14 -> q13 [ label=\"0\" ];\n"));
}

#[test]
fn test_dot_export_to_file() {
    let g = build(2).unwrap();
    let path = std::env::temp_dir().join(format!("lastn-dfa-test-{}.dot", std::process::id()));
    dot::export_to_file(&g, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(text, dot::to_dot_string(&g));
}
