//! Connected groups and liberty counting.
//!
//! Groups are never stored: they are recomputed from the occupant grid every
//! time they are needed, using a worklist flood-fill over the precomputed
//! adjacency.

use std::collections::BTreeSet;

use crate::board::{Board, Occupant, Point};

/// A set of same-owner connected stones.
pub type Group = BTreeSet<Point>;

impl Board {
    /// Number of empty intersections directly adjacent to `pt`.
    pub fn liberties(&self, pt: Point) -> usize {
        self.neighbors(pt)
            .iter()
            .filter(|&&n| self.get(n).is_empty())
            .count()
    }

    /// All stones connected to `pt` that share its owner.
    ///
    /// # Panics
    /// If `pt` is empty. Asking for the group of an empty intersection is a
    /// programming error.
    pub fn group(&self, pt: Point) -> Group {
        let owner = self.get(pt);
        assert!(
            !owner.is_empty(),
            "group() called on empty intersection {:?}",
            self.coords(pt)
        );

        let mut group = Group::new();
        let mut stack = vec![pt];
        while let Some(cur) = stack.pop() {
            if !group.insert(cur) {
                continue;
            }
            for &n in self.neighbors(cur) {
                if self.get(n) == owner && !group.contains(&n) {
                    stack.push(n);
                }
            }
        }
        group
    }

    /// Sum of the member liberties of a group. Shared liberties are counted
    /// once per adjacent member, so only zero versus non-zero is meaningful.
    pub fn group_liberties(&self, group: &Group) -> usize {
        group.iter().map(|&pt| self.liberties(pt)).sum()
    }

    /// Each distinct enemy group touching the stone at `pt`, in neighbor order.
    ///
    /// # Panics
    /// If `pt` is empty.
    pub fn adjacent_enemy_groups(&self, pt: Point) -> Vec<Group> {
        let own = self.get(pt);
        assert!(
            !own.is_empty(),
            "adjacent_enemy_groups() called on empty intersection {:?}",
            self.coords(pt)
        );

        let mut groups: Vec<Group> = Vec::new();
        for &n in self.neighbors(pt) {
            let other = self.get(n);
            if other.is_empty() || other == own {
                continue;
            }
            if groups.iter().any(|g| g.contains(&n)) {
                continue;
            }
            groups.push(self.group(n));
        }
        groups
    }

    /// Every group on the board that has no liberty left.
    pub fn zero_liberty_groups(&self) -> Vec<Group> {
        let mut seen = vec![false; self.len()];
        let mut dead = Vec::new();
        for pt in self.points() {
            if seen[pt] || self.get(pt) == Occupant::Empty {
                continue;
            }
            let group = self.group(pt);
            for &member in &group {
                seen[member] = true;
            }
            if self.group_liberties(&group) == 0 {
                dead.push(group);
            }
        }
        dead
    }
}
