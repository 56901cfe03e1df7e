//! Net construction from terminals and wires.
//!
//! Terminals live in a flat arena (see [`TerminalId`]). Wires are unioned in
//! a disjoint-set forest; each resulting set is one net.
//!
//! ## Net numbering
//!
//! Nets are numbered by scanning elements in input order, first terminal
//! before second, and giving each set the next index the first time one of
//! its terminals is seen. Net 0 is the reference net: the set of the
//! explicitly designated reference terminal if there is one, otherwise the
//! set of the first element's first terminal.

use super::types::{NetId, TerminalId, VarIndex};

/// Disjoint-set forest with path halving and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create `size` singleton sets.
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Number of elements in the universe.
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Find the representative of `x`'s set.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets containing `a` and `b`. Returns false if they were
    /// already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        true
    }
}

/// Terminal-to-net assignment for one circuit snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NetList {
    /// Net of each terminal, indexed by `TerminalId`
    terminal_nets: Vec<NetId>,
    /// Number of nets (including the reference)
    num_nets: usize,
}

impl NetList {
    /// Build nets for `element_count` two-terminal elements.
    ///
    /// `wires` holds already-resolved terminal pairs. `reference`, if given,
    /// is the terminal whose net becomes [`NetId::REFERENCE`].
    pub fn build(
        element_count: usize,
        wires: &[(TerminalId, TerminalId)],
        reference: Option<TerminalId>,
    ) -> Self {
        let terminal_count = 2 * element_count;
        let mut sets = DisjointSet::new(terminal_count);

        for &(a, b) in wires {
            sets.union(a.0, b.0);
        }

        // Root -> net index; usize::MAX marks "not yet numbered"
        let mut root_net = vec![usize::MAX; terminal_count];
        let mut next = 0usize;

        if let Some(r) = reference {
            let root = sets.find(r.0);
            root_net[root] = next;
            next += 1;
        }

        let mut terminal_nets = Vec::with_capacity(sets.len());
        for t in 0..sets.len() {
            let root = sets.find(t);
            if root_net[root] == usize::MAX {
                root_net[root] = next;
                next += 1;
            }
            terminal_nets.push(NetId(root_net[root]));
        }

        log::trace!(
            "built {} nets from {} terminals and {} wires",
            next,
            terminal_count,
            wires.len()
        );

        Self {
            terminal_nets,
            num_nets: next,
        }
    }

    /// Number of nets, including the reference net.
    pub fn net_count(&self) -> usize {
        self.num_nets
    }

    /// Net of a terminal.
    pub fn net_of(&self, terminal: TerminalId) -> NetId {
        self.terminal_nets[terminal.0]
    }

    /// Nets of both terminals of an element.
    pub fn element_nets(&self, element_index: usize) -> [NetId; 2] {
        [
            self.terminal_nets[2 * element_index],
            self.terminal_nets[2 * element_index + 1],
        ]
    }

    /// All terminals that belong to a net, in arena order.
    pub fn terminals_in(&self, net: NetId) -> Vec<TerminalId> {
        self.terminal_nets
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == net)
            .map(|(t, _)| TerminalId(t))
            .collect()
    }

    /// Position of a net's voltage in the solution vector, `None` for the
    /// reference net.
    pub fn unknown_index(&self, net: NetId) -> Option<usize> {
        if net.is_reference() {
            None
        } else {
            Some(VarIndex::Voltage(net).to_index(self.num_nets))
        }
    }
}
