//! DOT 形式への書き出し。
//!
//! ノード 1 行 (`q<id> [ label="q<id>" shape="..." ];`)、辺 1 行
//! (`q<a> -> q<b> [ label="0" ];`)。START は `start` として出す。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::builder::Graph;
use crate::error::DfaError;

/// writer に DOT テキストを書く。
pub fn write_dot<W: Write>(graph: &Graph, mut w: W) -> Result<(), DfaError> {
    writeln!(w, "digraph G {{")?;
    for node in graph.nodes() {
        writeln!(w, "  {id} [ label=\"{id}\" shape=\"{}\" ];", node.shape.as_str(), id = node.id)?;
    }
    for edge in graph.edges() {
        writeln!(w, "  {} -> {} [ label=\"{}\" ];", edge.source, edge.target, edge.label.as_str())?;
    }
    writeln!(w, "}}")?;
    w.flush()?;
    Ok(())
}

pub fn to_dot_string(graph: &Graph) -> String {
    let mut buf = Vec::with_capacity(graph.edge_count() * 32);
    // Vec<u8> への書き込みは失敗しない
    if write_dot(graph, &mut buf).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// ファイルに書き出す。既存ファイルは上書き。
pub fn export_to_file(graph: &Graph, path: impl AsRef<Path>) -> Result<(), DfaError> {
    let file = File::create(path)?;
    write_dot(graph, BufWriter::new(file))
}
