//! Grid regression test
//!
//! Exercises the neighbor contract and the border walk on a small grid
//! with a known refinement:
//!
//! 1. Construction and canvas rounding
//! 2. Neighbor lists for the equal / larger / subdivided / border cases
//! 3. Border walk order and exactly-once emission
//! 4. Neighbor resolution across top-level trees
//!
//! Run with:
//! ```
//! cargo test -p lazybrush-partition --test grid_reg
//! ```

use lazybrush_core::{Point, Rect};
use lazybrush_partition::{Grid, Side};
use lazybrush_test::RegParams;

/// 16x16 canvas, two tiles wide, with the top-left tile refined at (2, 2).
///
/// Tile layout (tile side 8):
/// - tile 0 (0,0): 4x4 TL subtree refined down to 1x1 around (2, 2)
/// - tiles 1, 2, 3: untouched 8x8 leaves
fn refined_grid() -> Grid<u8> {
    let mut grid = Grid::new(Rect::from_origin_size(0, 0, 16, 16), 8).unwrap();
    grid.add_point(Point::new(2, 2)).unwrap();
    grid
}

#[test]
fn construction() {
    let mut rp = RegParams::new("grid_construction");

    let grid = refined_grid();
    rp.compare_values(8.0, grid.cell_size() as f64, 0.0);
    rp.compare_values(2.0, grid.width_in_cells() as f64, 0.0);
    rp.compare_values(2.0, grid.height_in_cells() as f64, 0.0);

    // Canvas rounding: 10x17 with cell size 8 becomes 16x24.
    let rounded: Grid<u8> = Grid::new(Rect::from_origin_size(0, 0, 10, 17), 8).unwrap();
    rp.check(
        rounded.rect() == Rect::from_origin_size(0, 0, 16, 24),
        "canvas rounds up to whole cells",
    );

    // Every point maps to exactly one leaf.
    let mut count = 0;
    grid.visit_leaves(|_| {
        count += 1;
        true
    });
    // tile 0: 4 quadrants, of which TL splits into 4, of which BR splits
    // into 4: 3 + (3 + 4) = 10 leaves; plus 3 whole tiles.
    rp.compare_values(13.0, count as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn neighbor_contract() {
    let mut rp = RegParams::new("grid_neighbors");

    let mut grid = refined_grid();
    grid.update_neighbors(false);

    let unit = grid.leaf_cell_at(Point::new(2, 2)).unwrap();
    rp.compare_values(1.0, grid.side_of(unit) as f64, 0.0);

    // Equal-size leaf: the right neighbor of the unit at (2,2) is the
    // single unit at (3,2).
    let right = grid.neighbors(unit, Side::Right);
    rp.compare_values(1.0, right.len() as f64, 0.0);
    rp.check(
        grid.rect_of(right[0]) == Rect::from_origin_size(3, 2, 1, 1),
        "equal-size neighbor is a singleton",
    );

    // Larger leaf: above the unit sits the unrefined 2x2 block at (2,0).
    let top = grid.neighbors(unit, Side::Top);
    rp.compare_values(1.0, top.len() as f64, 0.0);
    rp.check(
        grid.rect_of(top[0]) == Rect::from_origin_size(2, 0, 2, 2),
        "larger abutting leaf is used directly",
    );

    // Subdivided abutting cell: the 2x2 block at (2,0) sees the two units
    // tiling the top edge of the refined block below it.
    let block = grid.leaf_cell_at(Point::new(2, 0)).unwrap();
    let below: Vec<Rect> = grid
        .neighbors(block, Side::Bottom)
        .iter()
        .map(|&id| grid.rect_of(id))
        .collect();
    rp.check(
        below
            == vec![
                Rect::from_origin_size(2, 2, 1, 1),
                Rect::from_origin_size(3, 2, 1, 1),
            ],
        "subdivided abutting cell projects its far-side leaves",
    );

    // Canvas border: the top-left 2x2 block has no top or left neighbors.
    let corner = grid.leaf_cell_at(Point::new(0, 0)).unwrap();
    rp.compare_values(0.0, grid.neighbors(corner, Side::Top).len() as f64, 0.0);
    rp.compare_values(0.0, grid.neighbors(corner, Side::Left).len() as f64, 0.0);

    // Across top-level trees: the whole tile at (8,0) abuts the refined
    // tile and sees its two right-most 4x4 leaves.
    let tile1 = grid.leaf_cell_at(Point::new(8, 0)).unwrap();
    let lefts: Vec<Rect> = grid
        .neighbors(tile1, Side::Left)
        .iter()
        .map(|&id| grid.rect_of(id))
        .collect();
    rp.check(
        lefts
            == vec![
                Rect::from_origin_size(4, 0, 4, 4),
                Rect::from_origin_size(4, 4, 4, 4),
            ],
        "neighbors resolve across top-level trees",
    );

    assert!(rp.cleanup());
}

#[test]
fn top_left_only_covers_every_pair_once() {
    let mut rp = RegParams::new("grid_pairs");

    let mut grid = refined_grid();

    // Collect every adjacent unordered pair from a full pass.
    grid.update_neighbors(false);
    let mut full_pairs = std::collections::HashSet::new();
    grid.visit_leaves(|id| {
        for side in Side::ALL {
            for &n in grid.neighbors(id, side) {
                let (ra, rb) = (grid.rect_of(id), grid.rect_of(n));
                let pair = if (ra.left, ra.top) <= (rb.left, rb.top) {
                    (ra, rb)
                } else {
                    (rb, ra)
                };
                full_pairs.insert(pair);
            }
        }
        true
    });

    // The top/left-only pass must list each of those pairs exactly once.
    grid.update_neighbors(true);
    let mut seen = Vec::new();
    grid.visit_leaves(|id| {
        for side in [Side::Top, Side::Left] {
            for &n in grid.neighbors(id, side) {
                let (ra, rb) = (grid.rect_of(id), grid.rect_of(n));
                let pair = if (ra.left, ra.top) <= (rb.left, rb.top) {
                    (ra, rb)
                } else {
                    (rb, ra)
                };
                seen.push(pair);
            }
        }
        true
    });

    rp.compare_values(full_pairs.len() as f64, seen.len() as f64, 0.0);
    let seen_set: std::collections::HashSet<_> = seen.iter().copied().collect();
    rp.compare_values(seen.len() as f64, seen_set.len() as f64, 0.0);
    rp.check(seen_set == full_pairs, "same pair set as the full pass");

    assert!(rp.cleanup());
}

#[test]
fn border_walk() {
    let mut rp = RegParams::new("grid_border");

    let grid = refined_grid();
    let mut rects = Vec::new();
    grid.visit_border_leaves(|id| {
        rects.push(grid.rect_of(id));
        true
    });

    // Clockwise from the top-left corner's top edge.
    let expected = vec![
        Rect::from_origin_size(0, 0, 2, 2),
        Rect::from_origin_size(2, 0, 2, 2),
        Rect::from_origin_size(4, 0, 4, 4),
        Rect::from_origin_size(8, 0, 8, 8),
        Rect::from_origin_size(8, 8, 8, 8),
        Rect::from_origin_size(0, 8, 8, 8),
        Rect::from_origin_size(0, 4, 4, 4),
        Rect::from_origin_size(0, 2, 2, 2),
    ];
    rp.check(rects == expected, "border walk order");

    // Single-tile, unrefined grid: the lone leaf is emitted exactly once.
    let single: Grid<u8> = Grid::new(Rect::from_origin_size(0, 0, 4, 4), 4).unwrap();
    let mut count = 0;
    single.visit_border_leaves(|_| {
        count += 1;
        true
    });
    rp.compare_values(1.0, count as f64, 0.0);

    // Early stop.
    let mut emitted = 0;
    grid.visit_border_leaves(|_| {
        emitted += 1;
        false
    });
    rp.compare_values(1.0, emitted as f64, 0.0);

    assert!(rp.cleanup());
}
