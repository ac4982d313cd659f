//! The colorize entry point
//!
//! Turns a context into a complete labeling: freeze the working grid's
//! topology, flatten its leaves into a dense node array, run the
//! binary-cut sequence, and pair the resulting labels back with the leaf
//! rects. The returned rects tile the canvas exactly.

use lazybrush_core::{Label, Rect, Scribble};
use lazybrush_partition::Side;
use log::debug;

use crate::context::ColorizationContext;
use crate::error::ColorizeResult;
use crate::labeling::{label_nodes, LeafNode};
use crate::options::ColorizeOptions;

/// Compute a label for every leaf of the working grid
///
/// Returns `(rect, label)` pairs covering the canvas without gaps or
/// overlaps, in a fixed preorder. Labels are user labels,
/// [`Label::IMPLICIT_SURROUNDING`] where the surrounding option claimed
/// the area, or [`Label::UNDEFINED`] for the rare nodes no round and no
/// surrounding claims.
///
/// Running twice without an intervening mutation yields identical
/// output.
///
/// # Errors
///
/// Fails only if the min-cut engine rejects the flow problem.
pub fn colorize<S: Scribble>(
    context: &mut ColorizationContext<S>,
    options: &ColorizeOptions,
) -> ColorizeResult<Vec<(Rect, Label)>> {
    if context.is_null() {
        return Ok(Vec::new());
    }

    let canvas = context.working_grid().rect();

    // Deduplicate scribble labels, keeping first-appearance order and
    // dropping undefined ones.
    let mut labels: Vec<Label> = Vec::new();
    for scribble in context.scribbles() {
        let label = scribble.label();
        if label.is_defined() && !labels.contains(&label) {
            labels.push(label);
        }
    }

    // No scribbles (or none with a usable label): the whole canvas is
    // surrounding area, or nothing at all.
    if labels.is_empty() {
        let mut labeling = Vec::new();
        if options.use_implicit_surrounding {
            labeling.push((canvas, Label::IMPLICIT_SURROUNDING));
        }
        return Ok(labeling);
    }

    // A single label with no surrounding to compete against covers
    // everything.
    if labels.len() == 1 && !options.use_implicit_surrounding {
        return Ok(vec![(canvas, labels[0])]);
    }

    // Scribble mutations may have changed the topology; the labeling run
    // needs stable neighbor lists.
    context.update_neighbors();

    let nodes = flatten(context);
    let k = 2 * (canvas.width() + canvas.height());
    debug!(
        "colorize: {} leaves, {} labels, k = {}",
        nodes.len(),
        labels.len(),
        k
    );

    let computed = label_nodes(
        &nodes,
        &labels,
        k,
        options.scribble_weight,
        options.use_implicit_surrounding,
    )?;

    // Pair the computed labels back with the leaf rects, walking the
    // same preorder the flatten pass used.
    let grid = context.working_grid();
    let mut labeling = Vec::with_capacity(computed.len());
    let mut next = 0usize;
    grid.visit_leaves(|id| {
        labeling.push((grid.rect_of(id), computed[next]));
        next += 1;
        true
    });
    Ok(labeling)
}

/// Build the dense node array the solver works on
///
/// Assigns each leaf its preorder index (stored in the transient `index`
/// field), flags the border leaves, and collects one connection per
/// unordered adjacent pair from the top and left neighbor lists.
fn flatten<S: Scribble>(context: &mut ColorizationContext<S>) -> Vec<LeafNode> {
    let mut ids = Vec::new();
    context.working_grid().visit_leaves(|id| {
        ids.push(id);
        true
    });

    let mut nodes = Vec::with_capacity(ids.len());
    for (index, &id) in ids.iter().enumerate() {
        let grid = context.working_grid_mut();
        let side = grid.side_of(id);
        let data = grid.data_mut(id);
        data.index = index as i32;
        nodes.push(LeafNode {
            preferred_label: data.preferred_label,
            intensity: data.intensity,
            area: side * side,
            is_border_leaf: false,
            surrounding_border_size: side,
            connections: Vec::new(),
        });
    }

    let grid = context.working_grid();
    grid.visit_border_leaves(|id| {
        nodes[grid.data(id).index as usize].is_border_leaf = true;
        true
    });

    for (index, &id) in ids.iter().enumerate() {
        let side = grid.side_of(id);
        for list in [Side::Top, Side::Left] {
            for &neighbor in grid.neighbors(id, list) {
                nodes[index].connections.push((
                    grid.data(neighbor).index as usize,
                    side.min(grid.side_of(neighbor)),
                ));
            }
        }
    }

    nodes
}
