//! Radial placement of fixed-size items around a central hub.
//!
//! [`LayoutGeometry::compute`] is pure; [`RadialLayout`] caches the latest
//! result for a host that feeds it resize notifications.

pub const ITEM_DIAMETER: f64 = 64.0;
/// Below this radius items would overlap the hub.
pub const MIN_RADIUS: f64 = 70.0;
pub const EDGE_MARGIN: f64 = 6.0;

pub const MEDIUM_VIEWPORT: f64 = 768.0;
pub const WIDE_VIEWPORT: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Narrow,
    Medium,
    Wide,
}

impl Breakpoint {
    pub fn for_viewport(width: f64) -> Self {
        if width < MEDIUM_VIEWPORT {
            Self::Narrow
        } else if width < WIDE_VIEWPORT {
            Self::Medium
        } else {
            Self::Wide
        }
    }

    pub fn base_radius(self) -> f64 {
        match self {
            Self::Narrow => 110.0,
            Self::Medium => 140.0,
            Self::Wide => 170.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    pub index: usize,
    pub angle_degrees: f64,
    /// Offset from the orbit center.
    pub x: f64,
    pub y: f64,
}

impl LayoutItem {
    pub fn new(index: usize, item_count: usize, radius: f64) -> Self {
        let angle_degrees = angle_degrees(index, item_count);
        let rads = angle_degrees.to_radians();
        Self {
            index,
            angle_degrees,
            x: radius * rads.cos(),
            y: radius * rads.sin(),
        }
    }

    /// Top-left corner of the item's box inside a container of `container` size,
    /// with the orbit centered in it.
    pub fn top_left(&self, container: Size, item_diameter: f64) -> Point {
        Point::new(
            container.width / 2.0 + self.x - item_diameter / 2.0,
            container.height / 2.0 + self.y - item_diameter / 2.0,
        )
    }
}

/// Angle of item `index` when `item_count` items share the full circle.
/// Index 0 sits directly right of center.
pub fn angle_degrees(index: usize, item_count: usize) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    (index as f64 * 360.0) / item_count as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub container_width: f64,
    pub container_height: f64,
    pub item_diameter: f64,
    pub base_radius: f64,
    pub effective_radius: f64,
    pub orbit_size: f64,
}

impl LayoutGeometry {
    pub fn compute(container: Size, base_radius: f64, item_diameter: f64) -> Self {
        let effective_radius =
            Self::upper_bound(container, item_diameter).min(base_radius).max(MIN_RADIUS);

        Self {
            container_width: container.width,
            container_height: container.height,
            item_diameter,
            base_radius,
            effective_radius,
            orbit_size: 2.0 * effective_radius + item_diameter,
        }
    }

    /// Largest radius that keeps every item inside the container. May be
    /// negative for tiny containers; `compute` clamps it.
    pub fn upper_bound(container: Size, item_diameter: f64) -> f64 {
        container.width.min(container.height) / 2.0 - item_diameter / 2.0 - EDGE_MARGIN
    }

    pub fn container(&self) -> Size {
        Size::new(self.container_width, self.container_height)
    }

    pub fn items(&self, item_count: usize) -> Vec<LayoutItem> {
        (0..item_count)
            .map(|i| LayoutItem::new(i, item_count, self.effective_radius))
            .collect()
    }
}

/// Caches the latest geometry for a fixed item count. The host calls
/// [`RadialLayout::recompute`] on every resize.
#[derive(Debug, Clone)]
pub struct RadialLayout {
    item_count: usize,
    item_diameter: f64,
    latest: LayoutGeometry,
    items: Vec<LayoutItem>,
}

impl RadialLayout {
    pub fn new(item_count: usize, item_diameter: f64) -> Self {
        let latest = LayoutGeometry::compute(
            Size::default(),
            Breakpoint::Wide.base_radius(),
            item_diameter,
        );
        Self {
            item_count,
            item_diameter,
            items: latest.items(item_count),
            latest,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count != self.item_count {
            self.item_count = item_count;
            self.items = self.latest.items(item_count);
        }
    }

    pub fn recompute(&mut self, container: Size, viewport_width: f64) -> &LayoutGeometry {
        let base_radius = Breakpoint::for_viewport(viewport_width).base_radius();
        self.latest = LayoutGeometry::compute(container, base_radius, self.item_diameter);
        self.items = self.latest.items(self.item_count);
        &self.latest
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.latest
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_fitting_container() {
        let g = LayoutGeometry::compute(Size::new(400.0, 400.0), 170.0, ITEM_DIAMETER);
        assert_eq!(g.effective_radius, 162.0);
        assert_eq!(g.orbit_size, 2.0 * 162.0 + ITEM_DIAMETER);

        let angles: Vec<f64> = g.items(3).iter().map(|i| i.angle_degrees).collect();
        assert_eq!(angles, vec![0.0, 120.0, 240.0]);
    }

    #[test]
    fn test_small_container_clamps_to_minimum() {
        let g = LayoutGeometry::compute(Size::new(100.0, 100.0), 170.0, ITEM_DIAMETER);
        assert_eq!(LayoutGeometry::upper_bound(g.container(), ITEM_DIAMETER), 12.0);
        assert_eq!(g.effective_radius, MIN_RADIUS);
    }

    #[test]
    fn test_unmeasured_container() {
        let g = LayoutGeometry::compute(Size::default(), 110.0, ITEM_DIAMETER);
        assert_eq!(g.effective_radius, MIN_RADIUS);
        assert!(!g.container().is_measured());
    }

    #[test]
    fn test_large_container_uses_base_radius() {
        let g = LayoutGeometry::compute(Size::new(2000.0, 900.0), 140.0, ITEM_DIAMETER);
        assert_eq!(g.effective_radius, 140.0);
    }

    #[test]
    fn test_single_item_sits_right_of_center() {
        let items = LayoutGeometry::compute(Size::new(400.0, 400.0), 170.0, ITEM_DIAMETER).items(1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].angle_degrees, 0.0);
        assert!((items[0].x - 162.0).abs() < EPS);
        assert!(items[0].y.abs() < EPS);
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(Breakpoint::for_viewport(0.0).base_radius(), 110.0);
        assert_eq!(Breakpoint::for_viewport(767.9).base_radius(), 110.0);
        assert_eq!(Breakpoint::for_viewport(768.0).base_radius(), 140.0);
        assert_eq!(Breakpoint::for_viewport(1023.0).base_radius(), 140.0);
        assert_eq!(Breakpoint::for_viewport(1024.0).base_radius(), 170.0);
    }

    #[test]
    fn test_top_left_centers_orbit_in_container() {
        let container = Size::new(400.0, 300.0);
        let item = LayoutItem::new(0, 4, 100.0);
        let p = item.top_left(container, ITEM_DIAMETER);
        assert!((p.x - (200.0 + 100.0 - 32.0)).abs() < EPS);
        assert!((p.y - (150.0 - 32.0)).abs() < EPS);
    }

    #[test]
    fn test_radial_layout_tracks_resizes() {
        let mut layout = RadialLayout::new(4, ITEM_DIAMETER);
        assert_eq!(layout.geometry().effective_radius, MIN_RADIUS);

        layout.recompute(Size::new(400.0, 400.0), 1280.0);
        assert_eq!(layout.geometry().effective_radius, 162.0);
        assert_eq!(layout.items().len(), 4);

        layout.recompute(Size::new(400.0, 400.0), 600.0);
        assert_eq!(layout.geometry().effective_radius, 110.0);

        layout.recompute(Size::new(100.0, 100.0), 600.0);
        assert_eq!(layout.geometry().effective_radius, MIN_RADIUS);

        layout.set_item_count(6);
        assert_eq!(layout.items().len(), 6);
        assert_eq!(layout.items()[3].angle_degrees, 180.0);
    }

    proptest! {
        #[test]
        fn prop_angles_evenly_spaced(count in 1usize..64) {
            let items = LayoutGeometry::compute(Size::new(500.0, 500.0), 170.0, ITEM_DIAMETER)
                .items(count);
            let step = 360.0 / count as f64;

            for (i, item) in items.iter().enumerate() {
                prop_assert_eq!(item.angle_degrees, (i as f64 * 360.0) / count as f64);
                prop_assert!(item.angle_degrees < 360.0);
                if i > 0 {
                    let gap = item.angle_degrees - items[i - 1].angle_degrees;
                    prop_assert!((gap - step).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn prop_radius_bounds(
            w in 0.0f64..3000.0,
            h in 0.0f64..3000.0,
            base in prop_oneof![Just(110.0), Just(140.0), Just(170.0)],
        ) {
            let container = Size::new(w, h);
            let g = LayoutGeometry::compute(container, base, ITEM_DIAMETER);
            let upper = LayoutGeometry::upper_bound(container, ITEM_DIAMETER);

            prop_assert!(g.effective_radius >= MIN_RADIUS);
            if upper >= MIN_RADIUS {
                prop_assert!(g.effective_radius <= upper);
            } else {
                prop_assert_eq!(g.effective_radius, MIN_RADIUS);
            }
        }

        #[test]
        fn prop_positions_lie_on_circle(count in 1usize..32, w in 0.0f64..2000.0) {
            let g = LayoutGeometry::compute(Size::new(w, w), 170.0, ITEM_DIAMETER);
            for item in g.items(count) {
                prop_assert!((item.x.hypot(item.y) - g.effective_radius).abs() < 1e-6);
            }
        }
    }
}
