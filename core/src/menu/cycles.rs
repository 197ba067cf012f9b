//! Path and cycle counting over a menu
//!
//! A walk may use a merged edge as many times as it has crib positions; each
//! use multiplies the count by the positions still unused. Nodes already on
//! the walk cannot be revisited, except that the walk may close on its
//! target with its final step.

use super::{BombeMenu, MenuResult};

/// Scratch state for one counting run
struct PathWalk<'m> {
    menu: &'m BombeMenu,
    marked: Vec<bool>,
    remaining: Vec<usize>,
}

impl<'m> PathWalk<'m> {
    fn new(menu: &'m BombeMenu) -> Self {
        Self {
            menu,
            marked: vec![false; menu.nodes.len()],
            remaining: menu.edges.iter().map(|e| e.compound).collect(),
        }
    }

    fn count(&mut self, n: usize, source: usize, target: usize) -> u64 {
        if n == 0 {
            return u64::from(source == target);
        }
        if self.marked[source] {
            return 0;
        }

        self.marked[source] = true;
        let menu = self.menu;
        let node = &menu.nodes[source];
        let mut total = 0;

        let steps = node
            .outgoing
            .iter()
            .map(|&e| (e, menu.edges[e].target))
            .chain(node.incoming.iter().map(|&e| (e, menu.edges[e].source)));
        for (edge, next) in steps {
            let weight = self.remaining[edge];
            if weight == 0 {
                continue;
            }
            self.remaining[edge] -= 1;
            total += weight as u64 * self.count(n - 1, next, target);
            self.remaining[edge] += 1;
        }

        self.marked[source] = false;
        total
    }
}

impl BombeMenu {
    /// Walks of exactly `n` edges from letter `source` to letter `target`
    ///
    /// Letters of the alphabet that do not appear in the menu have no walks.
    pub fn count_paths(&self, n: usize, source: char, target: char) -> MenuResult<u64> {
        self.alphabet.index_of(source)?;
        self.alphabet.index_of(target)?;

        match (self.node_of_letter(source), self.node_of_letter(target)) {
            (Some(s), Some(t)) => Ok(PathWalk::new(self).count(n, s, t)),
            _ => Ok(0),
        }
    }

    /// Number of distinct cycles of length `n` (n >= 2)
    pub fn count_cycles_of_length(&self, n: usize) -> u64 {
        if n < 2 {
            return 0;
        }

        let mut walk = PathWalk::new(self);
        let mut total = 0;
        for i in 0..self.nodes.len().saturating_sub(n - 1) {
            total += walk.count(n, i, i);
            // Cycles through i are all counted now
            walk.marked[i] = true;
        }

        // Each cycle is found once per direction
        total / 2
    }

    /// Cycles of every length from 2 up to the crib length
    pub fn count_cycles(&self) -> u64 {
        (2..=self.len()).map(|n| self.count_cycles_of_length(n)).sum()
    }

    /// `[0, 0, c2, c3, ..., c_len]`, entry n being the number of cycles of
    /// length n
    pub fn classify_cycles(&self) -> Vec<u64> {
        let mut classes = vec![0, 0];
        classes.extend((2..=self.len()).map(|n| self.count_cycles_of_length(n)));
        classes
    }
}
