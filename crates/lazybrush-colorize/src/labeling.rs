//! The lazy-brush reduction
//!
//! Multi-label segmentation over the flattened leaf graph, solved as one
//! binary min-cut per label: round i separates "label i" from "everything
//! later". Nodes committed in earlier rounds drop out of the graph, and
//! their data terms with them, so processed labels never pull new cuts.
//!
//! Capacities are scaled by `k = 2 * (W + H)`: a cut along line pixels
//! costs about 1 per pixel, across blank canvas about `1 + k` per pixel,
//! so any cut that can follow the line art does.

use lazybrush_core::{Intensity, Label, INTENSITY_MAX};
use lazybrush_maxflow::{FlowGraph, FlowResult, Segment};
use log::debug;

use crate::options::ScribbleWeight;

/// One working-grid leaf, flattened for the solver
#[derive(Debug, Clone)]
pub(crate) struct LeafNode {
    pub preferred_label: Label,
    pub intensity: Intensity,
    /// Pixel count of the leaf (side squared)
    pub area: i32,
    pub is_border_leaf: bool,
    /// Side length, the border shared with the implicit surrounding
    pub surrounding_border_size: i32,
    /// `(node index, shared border length)` pairs; each unordered
    /// adjacency appears on exactly one of its two endpoints
    pub connections: Vec<(usize, i32)>,
}

/// Per-node solver bookkeeping, rebuilt per call
struct NodeState {
    flow_index: usize,
    terminal_weight: i32,
    smooth_weight: i32,
    computed_label: Label,
}

/// Run the binary-cut sequence and return one label per node
///
/// `labels` must be deduplicated, defined labels in processing order.
/// Nodes no round claims stay [`Label::UNDEFINED`], or become
/// [`Label::IMPLICIT_SURROUNDING`] when that option is on.
pub(crate) fn label_nodes(
    nodes: &[LeafNode],
    labels: &[Label],
    k: i32,
    scribble_weight: ScribbleWeight,
    use_implicit_surrounding: bool,
) -> FlowResult<Vec<Label>> {
    let per_area_weight = scribble_weight.per_area_weight(k);
    let implicit_surrounding_edge_weight = 1 + k;

    let mut states: Vec<NodeState> = nodes
        .iter()
        .map(|node| NodeState {
            flow_index: 0,
            terminal_weight: per_area_weight * node.area,
            smooth_weight: 1 + k * node.intensity as i32 / INTENSITY_MAX as i32,
            computed_label: Label::UNDEFINED,
        })
        .collect();

    // Indices of the still-unlabeled nodes, kept as a dense prefix so
    // every round iterates O(|active|) instead of O(n).
    let mut active: Vec<usize> = (0..nodes.len()).collect();
    let mut active_len = nodes.len();
    let mut processed: Vec<Label> = Vec::with_capacity(labels.len());

    for &current_label in labels {
        // Fresh dense flow-graph ids for this round.
        let mut connection_count = 0usize;
        for (flow_index, &node_index) in active[..active_len].iter().enumerate() {
            states[node_index].flow_index = flow_index;
            connection_count += nodes[node_index].connections.len();
        }

        let extra = usize::from(use_implicit_surrounding);
        let mut graph =
            FlowGraph::with_capacity(active_len + extra, 2 * connection_count + active_len);
        graph.add_nodes(active_len);
        let surrounding = if use_implicit_surrounding {
            let node = graph.add_node();
            // The surroundings extend forever and never belong to the
            // current label.
            graph.add_tweights(node, 0, i32::MAX)?;
            Some(node)
        } else {
            None
        };

        for &node_index in &active[..active_len] {
            let node = &nodes[node_index];
            let state = &states[node_index];

            // Data term: scribbled nodes pull toward their label's side
            // until that label has been processed.
            if node.preferred_label.is_defined() && !processed.contains(&node.preferred_label) {
                if node.preferred_label == current_label {
                    graph.add_tweights(state.flow_index, state.terminal_weight, 0)?;
                } else {
                    graph.add_tweights(state.flow_index, 0, state.terminal_weight)?;
                }
            }

            // Smoothness term, scaled by the length of the shared border.
            // Committed neighbors are out of the graph; their side of the
            // cut is already fixed.
            for &(neighbor_index, shared_border) in &node.connections {
                let neighbor = &states[neighbor_index];
                if neighbor.computed_label != Label::UNDEFINED {
                    continue;
                }
                graph.add_edge(
                    state.flow_index,
                    neighbor.flow_index,
                    state.smooth_weight * shared_border,
                    neighbor.smooth_weight * shared_border,
                )?;
            }

            // Border leaves additionally face the implicit surrounding.
            if node.is_border_leaf {
                if let Some(surrounding) = surrounding {
                    graph.add_edge(
                        state.flow_index,
                        surrounding,
                        state.smooth_weight * node.surrounding_border_size,
                        implicit_surrounding_edge_weight * node.surrounding_border_size,
                    )?;
                }
            }
        }

        let flow = graph.maxflow()?;

        // Commit every node the cut put on the label's side, compacting
        // the active prefix by swap-with-last.
        let before = active_len;
        let mut i = 0;
        while i < active_len {
            let node_index = active[i];
            if graph.segment(states[node_index].flow_index) == Segment::Source {
                states[node_index].computed_label = current_label;
                active.swap(i, active_len - 1);
                active_len -= 1;
            } else {
                i += 1;
            }
        }
        debug!(
            "label {}: committed {} of {} nodes (flow {})",
            current_label.id(),
            before - active_len,
            before,
            flow
        );

        processed.push(current_label);
    }

    Ok(states
        .iter()
        .map(|state| {
            if use_implicit_surrounding && state.computed_label == Label::UNDEFINED {
                Label::IMPLICIT_SURROUNDING
            } else {
                state.computed_label
            }
        })
        .collect())
}
