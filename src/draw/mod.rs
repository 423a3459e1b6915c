//!# draw
//!
//! Renders BFS-wave snapshots of an automaton's exploration from `q0` as
//! Graphviz `dot` graphs, one file per wave, to a caller-supplied
//! directory. Each snapshot is a `digraph { ... }` text description; the
//! crate does not rasterize pixels itself, turning a `.dot` file into an
//! image is left to an external Graphviz-compatible renderer.

use crate::dfa::Dfa;
use crate::error::RenderError;
use crate::nfa::Nfa;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

const EPSILON_GLYPH: char = 'ε';

struct NodeInfo {
    id: usize,
    label: String,
    initial: bool,
    accepting: bool,
    trap: bool,
}

struct EdgeInfo {
    from: usize,
    to: usize,
    symbols: Vec<String>,
}

/// The handful of facts the visualizer needs about an automaton, so that
/// [`render`] can dispatch on either flavor without caring which one it
/// got.
trait Explorable {
    fn initial(&self) -> usize;
    fn node(&self, idx: usize) -> NodeInfo;
    /// `(label, target)` for every outgoing transition of `idx`; `label`
    /// is `None` for an epsilon transition.
    fn edges(&self, idx: usize) -> Vec<(Option<&str>, usize)>;
}

impl Explorable for Nfa {
    fn initial(&self) -> usize {
        self.initial_state_index()
    }

    fn node(&self, idx: usize) -> NodeInfo {
        let s = &self.states()[idx];
        NodeInfo {
            id: idx,
            label: s.name().to_string(),
            initial: s.is_initial(),
            accepting: s.is_accepting(),
            trap: false,
        }
    }

    fn edges(&self, idx: usize) -> Vec<(Option<&str>, usize)> {
        let s = &self.states()[idx];
        let mut out: Vec<(Option<&str>, usize)> =
            s.epsilon_transitions().iter().map(|&t| (None, t)).collect();
        for (sym_idx, targets) in s.transitions().iter().enumerate() {
            let sym = self.alphabet()[sym_idx].as_ref();
            out.extend(targets.iter().map(|&t| (Some(sym), t)));
        }
        out
    }
}

impl Explorable for Dfa {
    fn initial(&self) -> usize {
        self.initial_state_index()
    }

    fn node(&self, idx: usize) -> NodeInfo {
        let s = &self.states()[idx];
        NodeInfo {
            id: idx,
            label: s.name().to_string(),
            initial: s.is_initial(),
            accepting: s.is_accepting(),
            trap: s.is_trap(),
        }
    }

    fn edges(&self, idx: usize) -> Vec<(Option<&str>, usize)> {
        let s = &self.states()[idx];
        s.transitions()
            .iter()
            .enumerate()
            .map(|(sym_idx, &t)| (Some(self.alphabet()[sym_idx].as_ref()), t))
            .collect()
    }
}

/// Renders BFS-wave snapshots of `nfa`'s exploration from `q0` into
/// `directory`, one `.dot` file per wave; returns the written paths in
/// wave order.
pub fn draw_nfa(nfa: &Nfa, directory: &Path) -> Result<Vec<PathBuf>, RenderError> {
    render(nfa, directory, "nfa")
}

/// Renders BFS-wave snapshots of `dfa`'s exploration from `q0` into
/// `directory`, one `.dot` file per wave; returns the written paths in
/// wave order.
pub fn draw_dfa(dfa: &Dfa, directory: &Path) -> Result<Vec<PathBuf>, RenderError> {
    render(dfa, directory, "dfa")
}

fn render(automaton: &dyn Explorable, directory: &Path, kind: &str) -> Result<Vec<PathBuf>, RenderError> {
    let waves = bfs_waves(automaton);

    let mut paths = Vec::with_capacity(waves.len());
    let mut discovered: Vec<usize> = Vec::new();
    let mut edges: Vec<EdgeInfo> = Vec::new();

    for (step, wave) in waves.iter().enumerate() {
        discovered.extend(wave.iter().copied());
        // Re-scan every state discovered so far, not just the previous
        // wave: this wave's own self-loops and back-edges into earlier
        // waves only have both endpoints discovered once this wave has
        // been added, and for the final wave there is no later snapshot
        // to draw them in otherwise. accumulate_edges is idempotent for
        // already-recorded (from, to) pairs, so re-scanning costs nothing
        // but a lookup.
        for &from in &discovered {
            accumulate_edges(automaton, from, &discovered, &mut edges);
        }

        let dot = render_dot(automaton, &discovered, &edges);
        let path = directory.join(format!("{kind}_step_{step}.dot"));
        fs::write(&path, dot).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        paths.push(path);
    }

    Ok(paths)
}

/// Breadth-first waves of states reachable from `q0`: wave 0 is `{q0}`;
/// wave `k + 1` is every not-yet-discovered state reachable by one
/// transition (epsilon or labeled) from some state in wave `k`.
fn bfs_waves(automaton: &dyn Explorable) -> Vec<Vec<usize>> {
    let mut waves = Vec::new();
    let mut discovered: HashSet<usize> = HashSet::new();
    let initial = automaton.initial();
    discovered.insert(initial);
    waves.push(vec![initial]);

    loop {
        let mut next = Vec::new();
        let mut queue: VecDeque<usize> = waves.last().unwrap().iter().copied().collect();
        while let Some(s) = queue.pop_front() {
            for (_, t) in automaton.edges(s) {
                if discovered.insert(t) {
                    next.push(t);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        waves.push(next);
    }

    waves
}

/// Records every edge emanating from `from` whose target has already been
/// discovered, aggregating repeated symbols between the same (source,
/// target) pair into one comma-joined label.
fn accumulate_edges(automaton: &dyn Explorable, from: usize, discovered: &[usize], edges: &mut Vec<EdgeInfo>) {
    for (label, to) in automaton.edges(from) {
        if !discovered.contains(&to) {
            continue;
        }
        let symbol = label.map(str::to_string).unwrap_or_else(|| EPSILON_GLYPH.to_string());
        match edges.iter_mut().find(|e| e.from == from && e.to == to) {
            Some(existing) if !existing.symbols.contains(&symbol) => existing.symbols.push(symbol),
            Some(_) => {}
            None => edges.push(EdgeInfo {
                from,
                to,
                symbols: vec![symbol],
            }),
        }
    }
}

fn render_dot(automaton: &dyn Explorable, discovered: &[usize], edges: &[EdgeInfo]) -> String {
    let mut out = String::from("digraph automaton {\n\trankdir=LR;\n");

    for &idx in discovered {
        let node = automaton.node(idx);
        let shape = if node.accepting { "doublecircle" } else { "circle" };
        let color = if node.trap {
            "lightgrey"
        } else if node.initial {
            "lightblue"
        } else if node.accepting {
            "lightgreen"
        } else {
            "white"
        };
        out.push_str(&format!(
            "\t{} [label=\"{}\", shape={shape}, style=filled, fillcolor={color}];\n",
            node.id, node.label,
        ));
    }

    for edge in edges {
        out.push_str(&format!(
            "\t{} -> {} [label=\"{}\"];\n",
            edge.from,
            edge.to,
            edge.symbols.join(",")
        ));
    }

    out.push_str("}\n");
    out
}
