use std::time::Duration;

pub const TRANSITION_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle { selected: usize },
    Transitioning { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Started(Transition),
    AlreadySelected,
    Busy,
    OutOfRange,
}

impl SelectOutcome {
    pub fn transition(&self) -> Option<Transition> {
        match self {
            Self::Started(t) => Some(*t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Previous,
    Next,
    Activate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    pub focus: usize,
    pub select: SelectOutcome,
}

/// Single-selection state for the orbit and other tabbed selectors.
///
/// At most one transition is in flight; requests arriving during one are
/// dropped rather than queued.
#[derive(Debug, Clone)]
pub struct Selector {
    item_count: usize,
    phase: SelectionPhase,
    focused: usize,
    delay: Duration,
    reduced_motion: bool,
}

impl Selector {
    pub fn new(item_count: usize, delay: Duration) -> Self {
        Self {
            item_count,
            phase: SelectionPhase::Idle { selected: 0 },
            focused: 0,
            delay,
            reduced_motion: false,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Index whose details are shown: the source of an in-flight transition.
    pub fn selected_index(&self) -> usize {
        match self.phase {
            SelectionPhase::Idle { selected } => selected,
            SelectionPhase::Transitioning { from, .. } => from,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, SelectionPhase::Transitioning { .. })
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn transition_delay(&self) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            self.delay
        }
    }

    /// Replaces the item set and delay, e.g. after a content reload. Keeps a
    /// selection that is still in range and abandons an in-flight transition.
    pub fn reset(&mut self, item_count: usize, delay: Duration) {
        self.item_count = item_count;
        self.delay = delay;
        let keep = self.selected_index();
        let selected = if keep < item_count { keep } else { 0 };
        self.phase = SelectionPhase::Idle { selected };
        self.focused = selected;
    }

    pub fn select(&mut self, target: usize) -> SelectOutcome {
        if target >= self.item_count {
            return SelectOutcome::OutOfRange;
        }
        match self.phase {
            SelectionPhase::Transitioning { .. } => SelectOutcome::Busy,
            SelectionPhase::Idle { selected } if selected == target => {
                SelectOutcome::AlreadySelected
            }
            SelectionPhase::Idle { selected } => {
                self.phase = SelectionPhase::Transitioning {
                    from: selected,
                    to: target,
                };
                SelectOutcome::Started(Transition {
                    from: selected,
                    to: target,
                    delay: self.transition_delay(),
                })
            }
        }
    }

    /// Called when the transition window elapses. Returns the new selection.
    pub fn complete(&mut self) -> Option<usize> {
        match self.phase {
            SelectionPhase::Transitioning { to, .. } => {
                self.phase = SelectionPhase::Idle { selected: to };
                Some(to)
            }
            SelectionPhase::Idle { .. } => None,
        }
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.item_count {
            self.focused = index;
        }
    }

    /// Moves focus circularly and requests selection of the focused item.
    pub fn navigate(&mut self, key: NavKey) -> Option<NavOutcome> {
        if self.item_count == 0 {
            return None;
        }
        let n = self.item_count;
        let target = match key {
            NavKey::Previous => (self.focused + n - 1) % n,
            NavKey::Next => (self.focused + 1) % n,
            NavKey::Activate => self.focused,
        };
        self.focused = target;
        Some(NavOutcome {
            focus: target,
            select: self.select(target),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_select_then_complete() {
        let mut s = Selector::new(3, TRANSITION_DELAY);
        let outcome = s.select(2);
        assert_eq!(
            outcome,
            SelectOutcome::Started(Transition {
                from: 0,
                to: 2,
                delay: TRANSITION_DELAY
            })
        );
        assert!(s.is_transitioning());
        assert_eq!(s.selected_index(), 0);

        assert_eq!(s.complete(), Some(2));
        assert_eq!(s.phase(), SelectionPhase::Idle { selected: 2 });
        assert_eq!(s.complete(), None);
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut s = Selector::new(3, TRANSITION_DELAY);
        assert_eq!(s.select(0), SelectOutcome::AlreadySelected);
        assert_eq!(s.phase(), SelectionPhase::Idle { selected: 0 });
    }

    #[test]
    fn test_select_while_transitioning_is_dropped() {
        let mut s = Selector::new(4, TRANSITION_DELAY);
        s.select(1);
        assert_eq!(s.select(3), SelectOutcome::Busy);
        assert_eq!(s.phase(), SelectionPhase::Transitioning { from: 0, to: 1 });
        assert_eq!(s.complete(), Some(1));
    }

    #[test]
    fn test_reduced_motion_collapses_delay() {
        let mut s = Selector::new(2, TRANSITION_DELAY);
        s.set_reduced_motion(true);
        assert_eq!(s.select(1).transition().map(|t| t.delay), Some(Duration::ZERO));
    }

    #[test]
    fn test_out_of_range() {
        let mut s = Selector::new(2, TRANSITION_DELAY);
        assert_eq!(s.select(2), SelectOutcome::OutOfRange);
        let mut empty = Selector::new(0, TRANSITION_DELAY);
        assert_eq!(empty.select(0), SelectOutcome::OutOfRange);
        assert_eq!(empty.navigate(NavKey::Next), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut s = Selector::new(3, Duration::ZERO);
        let prev = s.navigate(NavKey::Previous).unwrap();
        assert_eq!(prev.focus, 2);
        assert_eq!(prev.select.transition().map(|t| t.to), Some(2));
        s.complete();

        let next = s.navigate(NavKey::Next).unwrap();
        assert_eq!(next.focus, 0);
        s.complete();
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn test_activate_selects_focused() {
        let mut s = Selector::new(3, TRANSITION_DELAY);
        s.focus(1);
        let nav = s.navigate(NavKey::Activate).unwrap();
        assert_eq!(nav.focus, 1);
        assert_eq!(nav.select.transition().map(|t| t.to), Some(1));
    }

    #[test]
    fn test_reset_clamps_selection() {
        let mut s = Selector::new(5, TRANSITION_DELAY);
        s.select(4);
        s.complete();
        s.reset(2, TRANSITION_DELAY);
        assert_eq!(s.phase(), SelectionPhase::Idle { selected: 0 });
        assert_eq!(s.focused_index(), 0);

        s.select(1);
        s.reset(3, TRANSITION_DELAY);
        assert_eq!(s.phase(), SelectionPhase::Idle { selected: 0 });
    }

    #[test]
    fn test_reset_keeps_selection_in_range() {
        let mut s = Selector::new(4, TRANSITION_DELAY);
        s.set_reduced_motion(true);
        s.select(2);
        s.complete();

        s.reset(3, Duration::from_millis(40));
        assert_eq!(s.selected_index(), 2);
        assert_eq!(s.focused_index(), 2);
        assert!(s.reduced_motion());

        s.set_reduced_motion(false);
        assert_eq!(s.transition_delay(), Duration::from_millis(40));
    }

    proptest! {
        #[test]
        fn prop_selection_stays_in_range(
            count in 1usize..12,
            ops in proptest::collection::vec((0usize..16, any::<bool>()), 0..64),
        ) {
            let mut s = Selector::new(count, TRANSITION_DELAY);
            for (target, finish) in ops {
                let before = s.phase();
                let outcome = s.select(target);
                if matches!(before, SelectionPhase::Transitioning { .. }) {
                    prop_assert_eq!(s.phase(), before);
                }
                if outcome == SelectOutcome::AlreadySelected {
                    prop_assert_eq!(s.phase(), before);
                }
                if finish {
                    s.complete();
                }
                prop_assert!(s.selected_index() < count);
            }
        }

        #[test]
        fn prop_navigation_wraps_at_edges(count in 1usize..20) {
            let mut s = Selector::new(count, Duration::ZERO);
            prop_assert_eq!(s.navigate(NavKey::Previous).map(|n| n.focus), Some(count - 1));
            s.complete();
            prop_assert_eq!(s.navigate(NavKey::Next).map(|n| n.focus), Some(0));
        }
    }
}
