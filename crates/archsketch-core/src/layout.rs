//! Deterministic coordinate assignment.
//!
//! All placement is pure arithmetic on fixed constants: grid cells, layered
//! rows, hub-and-spoke cells and container slots. Nothing here depends on
//! hashing order or the clock, so equal inputs always produce equal layouts.

use crate::model::{Component, Layer, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box of a placed component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn of(component: &Component) -> Self {
        Self::new(component.position, footprint(&component.kind))
    }

    /// True when the interiors overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// Every leaf component.
pub const LEAF: Size = Size::new(160.0, 100.0);
/// VNets, VPCs and clusters: sized to hold four leaf children.
pub const CONTAINER: Size = Size::new(700.0, 500.0);
/// Subscription boxes hold one container.
pub const SUBSCRIPTION: Size = Size::new(800.0, 600.0);

pub const GRID_ORIGIN: Position = Position::new(100.0, 100.0);
pub const GRID_CELL_WIDTH: f64 = 250.0;
pub const GRID_CELL_HEIGHT: f64 = 150.0;
pub const GENERIC_COLUMNS: usize = 3;

pub const LAYER_ORIGIN: Position = Position::new(100.0, 50.0);
pub const LAYER_GAP_X: f64 = 90.0;
pub const LAYER_GAP_Y: f64 = 50.0;

/// Clear space between hub-and-spoke cells.
pub const SPOKE_MARGIN_X: f64 = 500.0;
pub const SPOKE_MARGIN_Y: f64 = 400.0;
pub const HUB_SPOKE_ORIGIN: Position = Position::new(550.0, 100.0);
/// Where the spoke VNet sits inside its subscription.
pub const SUBSCRIPTION_INSET: (f64, f64) = (50.0, 70.0);

/// Slots inside a [`CONTAINER`], row-major.
pub const CONTAINER_SLOTS: usize = 4;
const SLOT_INSET: (f64, f64) = (60.0, 80.0);
const SLOT_STRIDE: (f64, f64) = (340.0, 220.0);

/// Layout footprint for a component kind.
pub fn footprint(kind: &str) -> Size {
    match kind {
        "subscription" => SUBSCRIPTION,
        "network" | "kubernetes" => CONTAINER,
        _ => LEAF,
    }
}

pub fn place_grid(
    index: usize,
    columns: usize,
    cell_width: f64,
    cell_height: f64,
    origin: Position,
) -> Position {
    let columns = columns.max(1);
    Position::new(
        origin.x + (index % columns) as f64 * cell_width,
        origin.y + (index / columns) as f64 * cell_height,
    )
}

/// Position of a child in `slot` of a container placed at `parent`. The
/// child box lies entirely inside the container box.
pub fn place_contained(parent: Position, slot: usize) -> Position {
    debug_assert!(slot < CONTAINER_SLOTS, "container slot {slot} out of range");
    let col = (slot % 2) as f64;
    let row = (slot / 2) as f64;
    parent.offset(SLOT_INSET.0 + col * SLOT_STRIDE.0, SLOT_INSET.1 + row * SLOT_STRIDE.1)
}

/// Spoke grid width: one row up to 3 spokes, rows of 3 up to 6, rows of 4 beyond.
pub fn spoke_columns(count: usize) -> usize {
    match count {
        0..=3 => count.max(1),
        4..=6 => 3,
        _ => 4,
    }
}

fn spoke_grid_width(count: usize) -> f64 {
    let columns = spoke_columns(count) as f64;
    columns * SUBSCRIPTION.width + (columns - 1.0) * SPOKE_MARGIN_X
}

/// Hub container, centred horizontally above the spoke grid.
pub fn place_hub(spoke_count: usize) -> Position {
    let centred = (spoke_grid_width(spoke_count) - CONTAINER.width) / 2.0;
    Position::new(HUB_SPOKE_ORIGIN.x + centred.max(0.0), HUB_SPOKE_ORIGIN.y)
}

/// Subscription cell for spoke `index` of `count`, below the hub.
pub fn place_radial_spoke(index: usize, count: usize) -> Position {
    let origin = Position::new(
        HUB_SPOKE_ORIGIN.x,
        HUB_SPOKE_ORIGIN.y + CONTAINER.height + SPOKE_MARGIN_Y,
    );
    place_grid(
        index,
        spoke_columns(count),
        SUBSCRIPTION.width + SPOKE_MARGIN_X,
        SUBSCRIPTION.height + SPOKE_MARGIN_Y,
        origin,
    )
}

/// Shared services beside the hub: a 3-column grid to its right. Holds up
/// to 9 entries before reaching the spoke rows.
pub fn place_shared_service(index: usize, hub: Position) -> Position {
    let origin = Position::new(hub.x + CONTAINER.width + LAYER_GAP_X * 2.0, hub.y);
    place_grid(index, 3, GRID_CELL_WIDTH, GRID_CELL_HEIGHT, origin)
}

/// Left of the hub, vertically centred on it.
pub fn place_hub_edge(hub: Position) -> Position {
    Position::new(
        GRID_ORIGIN.x,
        hub.y + (CONTAINER.height - LEAF.height) / 2.0,
    )
}

/// Row-per-tier placement. Every declared tier owns a row whether or not
/// anything lands in it; a row is as tall as its tallest box plus
/// [`LAYER_GAP_Y`], and x advances by box width plus [`LAYER_GAP_X`].
#[derive(Debug, Clone)]
pub struct LayerRows {
    rows: Vec<(Layer, f64)>,
    cursors: Vec<f64>,
}

impl LayerRows {
    /// `tallest` reports the height of the tallest box in a tier, if any.
    pub fn new(tiers: &[Layer], tallest: impl Fn(Layer) -> Option<f64>) -> Self {
        let mut y = LAYER_ORIGIN.y;
        let mut rows = Vec::with_capacity(tiers.len());
        for &tier in tiers {
            if rows.iter().any(|(t, _)| *t == tier) {
                continue;
            }
            rows.push((tier, y));
            y += tallest(tier).unwrap_or(LEAF.height).max(LEAF.height) + LAYER_GAP_Y;
        }
        let cursors = vec![LAYER_ORIGIN.x; rows.len()];
        Self { rows, cursors }
    }

    pub fn row_y(&self, tier: Layer) -> Option<f64> {
        self.rows.iter().find(|(t, _)| *t == tier).map(|(_, y)| *y)
    }

    /// Next free spot in `tier`'s row. Tiers without a row go to the last row.
    pub fn place(&mut self, tier: Layer, size: Size) -> Position {
        let idx = self
            .rows
            .iter()
            .position(|(t, _)| *t == tier)
            .unwrap_or(self.rows.len().saturating_sub(1));
        let Some(&(_, y)) = self.rows.get(idx) else {
            return LAYER_ORIGIN;
        };
        let x = self.cursors[idx];
        self.cursors[idx] += size.width + LAYER_GAP_X;
        Position::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn grid_wraps_by_columns() {
        let p = place_grid(4, 3, 250.0, 150.0, GRID_ORIGIN);
        assert_eq!(p, Position::new(350.0, 250.0));
        assert_eq!(place_grid(0, 0, 10.0, 10.0, Position::default()), Position::default());
    }

    #[test]
    fn simple_tiers_match_fixed_table() {
        let tiers = [Layer::Presentation, Layer::Application, Layer::Data, Layer::Infrastructure];
        let rows = LayerRows::new(&tiers, |_| None);
        let ys: Vec<_> = tiers.iter().map(|t| rows.row_y(*t).unwrap()).collect();
        assert_eq!(ys, vec![50.0, 200.0, 350.0, 500.0]);
    }

    #[test]
    fn tall_tier_pushes_later_rows_down() {
        let tiers = [Layer::Presentation, Layer::Network, Layer::Data];
        let rows = LayerRows::new(&tiers, |t| (t == Layer::Network).then_some(CONTAINER.height));
        assert_eq!(rows.row_y(Layer::Network), Some(200.0));
        assert_eq!(rows.row_y(Layer::Data), Some(750.0));
    }

    #[test]
    fn layer_row_advances_x() {
        let mut rows = LayerRows::new(&[Layer::Application], |_| None);
        let a = rows.place(Layer::Application, LEAF);
        let b = rows.place(Layer::Application, LEAF);
        assert_eq!(b.x - a.x, 250.0);
        assert!(!Rect::new(a, LEAF).intersects(&Rect::new(b, LEAF)));
    }

    #[test_case(1, 1)]
    #[test_case(3, 3)]
    #[test_case(4, 3)]
    #[test_case(6, 3)]
    #[test_case(7, 4)]
    #[test_case(20, 4)]
    fn spoke_columns_wrap_at_thresholds(count: usize, expected: usize) {
        assert_eq!(spoke_columns(count), expected);
    }

    #[test]
    fn contained_slots_stay_inside_container() {
        let parent = Position::new(300.0, 900.0);
        let outer = Rect::new(parent, CONTAINER);
        let mut placed: Vec<Rect> = Vec::new();
        for slot in 0..CONTAINER_SLOTS {
            let r = Rect::new(place_contained(parent, slot), LEAF);
            assert!(outer.contains(&r), "slot {slot} escapes");
            assert!(placed.iter().all(|p| !p.intersects(&r)));
            placed.push(r);
        }
    }

    #[test]
    fn spokes_never_touch_hub_or_each_other() {
        for count in 1..=20 {
            let hub = Rect::new(place_hub(count), CONTAINER);
            let cells: Vec<Rect> = (0..count)
                .map(|i| Rect::new(place_radial_spoke(i, count), SUBSCRIPTION))
                .collect();
            for (i, a) in cells.iter().enumerate() {
                assert!(!a.intersects(&hub), "spoke {i} of {count} hits hub");
                for b in &cells[i + 1..] {
                    assert!(!a.intersects(b));
                }
            }
        }
    }
}
