//! Physical monitor lookup.
//!
//! The [`MonitorRegistry`] holds the monitor rectangles in the order the
//! display server enumerated them.  The order carries no meaning beyond
//! defining what "next monitor" means for cyclic switching.

use crate::geometry::Rect;

/// Index of the monitor whose area contains the center of `window`.
///
/// Uses the window's center rather than its top-left corner, so a window
/// straddling two screens belongs to the one holding most of it.  The test
/// is half-open: a center exactly on the shared edge of two abutting
/// monitors belongs to the right / lower one.  The first match in list
/// order wins.
pub fn find_containing(window: &Rect, monitors: &[Rect]) -> Option<usize> {
    let (cx, cy) = window.center();
    monitors.iter().position(|m| m.contains_point(cx, cy))
}

/// The monitor after `index` in cyclic order, or `None` if there are no
/// monitors.
pub fn next_monitor(index: usize, count: usize) -> Option<usize> {
    if count == 0 {
        None
    } else {
        Some((index + 1) % count)
    }
}

/// The ordered list of monitors queried once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRegistry {
    monitors: Vec<Rect>,
}

impl MonitorRegistry {
    pub fn new(monitors: Vec<Rect>) -> Self {
        Self { monitors }
    }

    pub fn get(&self, index: usize) -> Option<&Rect> {
        self.monitors.get(index)
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.monitors.iter()
    }

    /// See [`find_containing`].
    pub fn find_containing(&self, window: &Rect) -> Option<usize> {
        find_containing(window, &self.monitors)
    }

    /// See [`next_monitor`].
    pub fn next(&self, index: usize) -> Option<usize> {
        next_monitor(index, self.monitors.len())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn side_by_side() -> Vec<Rect> {
        vec![
            Rect::new(0, 0, 1920, 1080),
            Rect::new(1920, 0, 1920, 1080),
        ]
    }

    #[test]
    fn window_inside_first_monitor() {
        let w = Rect::new(100, 100, 200, 200);
        assert_eq!(find_containing(&w, &side_by_side()), Some(0));
    }

    #[test]
    fn window_inside_second_monitor() {
        let w = Rect::new(2500, 300, 400, 300);
        assert_eq!(find_containing(&w, &side_by_side()), Some(1));
    }

    #[test]
    fn center_on_shared_edge_goes_to_right_monitor() {
        // center x = 1820 + 100 = 1920
        let w = Rect::new(1820, 100, 200, 200);
        assert_eq!(find_containing(&w, &side_by_side()), Some(1));
    }

    #[test]
    fn straddling_window_uses_center_not_corner() {
        // top-left on monitor 0, but most of it on monitor 1
        let w = Rect::new(1800, 0, 800, 600);
        assert_eq!(find_containing(&w, &side_by_side()), Some(1));
    }

    #[test]
    fn center_on_shared_horizontal_edge_goes_to_lower_monitor() {
        let stacked = vec![
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 1080, 1920, 1080),
        ];
        let w = Rect::new(0, 980, 400, 200);
        assert_eq!(find_containing(&w, &stacked), Some(1));
    }

    #[test]
    fn center_outside_every_monitor() {
        let w = Rect::new(5000, 5000, 100, 100);
        assert_eq!(find_containing(&w, &side_by_side()), None);
    }

    #[test]
    fn no_monitors_finds_nothing() {
        let w = Rect::new(0, 0, 100, 100);
        assert_eq!(find_containing(&w, &[]), None);
    }

    #[test]
    fn overlapping_monitors_first_wins() {
        // cloned outputs report the same area twice
        let mirrored = vec![Rect::new(0, 0, 1920, 1080), Rect::new(0, 0, 1920, 1080)];
        let w = Rect::new(10, 10, 100, 100);
        assert_eq!(find_containing(&w, &mirrored), Some(0));
    }

    #[test]
    fn next_monitor_wraps_around() {
        assert_eq!(next_monitor(0, 2), Some(1));
        assert_eq!(next_monitor(1, 2), Some(0));
        assert_eq!(next_monitor(0, 1), Some(0));
    }

    #[test]
    fn next_monitor_is_a_bijection() {
        for n in 1..8 {
            let image: HashSet<usize> = (0..n).filter_map(|i| next_monitor(i, n)).collect();
            assert_eq!(image, (0..n).collect::<HashSet<_>>(), "n = {}", n);
            assert_eq!(next_monitor(n - 1, n), Some(0));
        }
    }

    #[test]
    fn next_monitor_without_monitors() {
        assert_eq!(next_monitor(0, 0), None);
    }

    #[test]
    fn registry_delegates() {
        let reg = MonitorRegistry::new(side_by_side());
        assert_eq!(reg.len(), 2);
        assert!(!reg.is_empty());
        assert_eq!(reg.find_containing(&Rect::new(2000, 10, 10, 10)), Some(1));
        assert_eq!(reg.next(1), Some(0));
        assert_eq!(reg.get(1), Some(&Rect::new(1920, 0, 1920, 1080)));
        assert_eq!(reg.get(2), None);
    }

    #[test]
    fn empty_registry() {
        let reg = MonitorRegistry::new(Vec::new());
        assert!(reg.is_empty());
        assert_eq!(reg.next(0), None);
    }
}
