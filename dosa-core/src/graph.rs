//! Condensed flow graph: one node per active region plus its background pseudo-node, one link per
//! non-zero matrix cell.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    engine::Pass,
    matrix::{Attribution, Node},
    registry::Registry,
};

/// Caller-chosen link width range, e.g. stroke widths in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct WidthRange {
    pub min: f64,
    pub max: f64,
}

impl Default for WidthRange {
    fn default() -> Self {
        WidthRange { min: 1., max: 10. }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct GraphNode {
    pub node: Node,
    pub label: String,
    /// Visible edges leaving (`out`) and entering (`in`) this node.
    pub out: u64,
    #[serde(rename = "in")]
    pub inbound: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct GraphLink {
    pub source: Node,
    pub target: Node,
    pub count: u64,
    /// `count / total_visible`
    pub weight: f64,
    /// `count` scaled linearly into the width range, relative to the heaviest link.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct CondensedGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub total_visible: usize,
}

impl CondensedGraph {
    /// Build the graph for `pass`. Cells touching slots no longer active in `registry` are skipped,
    /// so a pass computed before a region was deleted doesn't resurrect its node.
    pub fn new(pass: &Pass, registry: &Registry, range: WidthRange) -> Self {
        let matrix = &pass.matrix;
        let n = matrix.capacity;
        let nodes = registry
            .active()
            .flat_map(|r| [Node::Region(r.slot), Node::Background(r.slot)])
            .map(|node| GraphNode {
                node,
                label: node.to_string(),
                out: matrix.row_sum(node.index(n)),
                inbound: matrix.col_sum(node.index(n)),
            })
            .collect();

        let cells: Vec<(Attribution, u64)> = matrix
            .non_zero()
            .filter(|(a, _)| registry.is_active(a.source.slot()) && registry.is_active(a.destination.slot()))
            .collect();
        let max = cells.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let total = pass.total_visible as f64;
        let links = cells
            .into_iter()
            .sorted_by_key(|(a, _)| (a.source, a.destination))
            .map(|(a, count)| GraphLink {
                source: a.source,
                target: a.destination,
                count,
                weight: if total > 0. { count as f64 / total } else { 0. },
                width: range.min + (range.max - range.min) * (count as f64 / max as f64),
            })
            .collect();

        CondensedGraph { nodes, links, total_visible: pass.total_visible }
    }

    pub fn link(&self, source: Node, target: Node) -> Option<&GraphLink> {
        self.links.iter().find(|l| l.source == source && l.target == target)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use crate::{config::EngineConfig, edge::Edge, engine::Engine, r2::R2};
    use super::*;
    use test_log::test;

    fn engine() -> Engine {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.add_region(R2::new(0., 10.), R2::new(5., 5.)).unwrap();
        engine.add_region(R2::new(5., 10.), R2::new(10., 5.)).unwrap();
        let day = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap();
        engine.load(vec![
            Edge::new(0, (1., 9.), (1., 6.), day),
            Edge::new(1, (1., 9.), (2., 6.), day),
            Edge::new(2, (1., 9.), (6., 6.), day),
            Edge::new(3, (1., 9.), (20., 20.), day),
        ]);
        engine
    }

    #[test]
    fn nodes_and_links() {
        let mut engine = engine();
        let pass = engine.recompute().clone();
        let graph = CondensedGraph::new(&pass, engine.registry(), WidthRange { min: 1., max: 5. });

        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["R0", "B0", "R1", "B1"]);
        assert_eq!(graph.nodes[0].out, 4);
        assert_eq!(graph.nodes[0].inbound, 2);
        assert_eq!(graph.nodes[2].inbound, 1);

        assert_eq!(graph.links.len(), 3);
        let within = graph.link(Node::Region(0), Node::Region(0)).unwrap();
        assert_eq!(within.count, 2);
        assert_relative_eq!(within.weight, 0.5);
        assert_relative_eq!(within.width, 5.);
        let between = graph.link(Node::Region(0), Node::Region(1)).unwrap();
        assert_relative_eq!(between.weight, 0.25);
        assert_relative_eq!(between.width, 3.);
        assert!(graph.link(Node::Region(0), Node::Background(0)).is_some());

        let weights: f64 = graph.links.iter().map(|l| l.weight).sum();
        assert_relative_eq!(weights, 1.);
    }

    #[test]
    fn deleted_region_dropped() {
        let mut engine = engine();
        let pass = engine.recompute().clone();
        engine.remove_region(1);
        let graph = CondensedGraph::new(&pass, engine.registry(), WidthRange::default());
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.links.iter().all(|l| l.source.slot() == 0 && l.target.slot() == 0));
    }

    #[test]
    fn empty() {
        let mut engine = Engine::default();
        let pass = engine.recompute().clone();
        let graph = CondensedGraph::new(&pass, engine.registry(), WidthRange::default());
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
        assert_eq!(graph.total_visible, 0);
    }
}
