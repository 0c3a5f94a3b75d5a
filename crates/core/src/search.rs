//! Reachability search over piece poses.
//!
//! Breadth-first walk from a start pose using the transition engine's
//! validity test as the edge relation. Poses live in an arena; each node
//! remembers the parent and move that reached it, so the move sequence to any
//! pose can be rebuilt. A `D` that cannot be taken is a terminal lock edge,
//! never a node.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::rules::Rules;
use crate::types::{Move, PieceId};
use crate::well::{CoreState, Piece, Well};

#[derive(Debug, Clone)]
struct Node {
    piece: Piece,
    parent: Option<(usize, Move)>,
}

/// A lock edge: locking from pose `node` produces outcome `outcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEdge {
    pub node: usize,
    pub outcome: usize,
}

/// Result of a search: every reachable pose and every distinct lock outcome,
/// both in discovery order.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
    locks: Vec<LockEdge>,
    outcomes: Vec<CoreState>,
}

impl SearchTree {
    /// Distinct post-lock states.
    pub fn outcomes(&self) -> &[CoreState] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<CoreState> {
        self.outcomes
    }

    pub fn locks(&self) -> &[LockEdge] {
        &self.locks
    }

    /// Number of distinct poses visited.
    pub fn pose_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn poses(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.nodes.iter().map(|n| &n.piece)
    }

    /// Moves from the start pose to `node`.
    pub fn path_to_node(&self, node: usize) -> Vec<Move> {
        let mut path = Vec::new();
        let mut cursor = node;
        while let Some((parent, mv)) = self.nodes[cursor].parent {
            path.push(mv);
            cursor = parent;
        }
        path.reverse();
        path
    }

    /// Moves that produce `outcome`, ending with the locking `D`. Uses the
    /// first lock edge discovered for that outcome.
    pub fn path_to_outcome(&self, outcome: usize) -> Option<Vec<Move>> {
        let edge = self.locks.iter().find(|e| e.outcome == outcome)?;
        let mut path = self.path_to_node(edge.node);
        path.push(Move::Down);
        Some(path)
    }
}

impl Rules {
    /// Explore every pose reachable from `start` and record each lock.
    ///
    /// An invalid start pose yields an empty tree.
    pub fn search(&self, core: &CoreState, start: Piece) -> SearchTree {
        let mut tree = SearchTree::default();
        if !self.fits(&core.well, &start) {
            return tree;
        }

        let mut visited: FxHashSet<Piece> = FxHashSet::default();
        let mut outcome_index: FxHashMap<CoreState, usize> = FxHashMap::default();

        visited.insert(start);
        tree.nodes.push(Node {
            piece: start,
            parent: None,
        });

        let mut cursor = 0;
        while cursor < tree.nodes.len() {
            let piece = tree.nodes[cursor].piece;
            for mv in Move::ALL {
                match self.try_move(&core.well, &piece, mv) {
                    Some(next) => {
                        if visited.insert(next) {
                            tree.nodes.push(Node {
                                piece: next,
                                parent: Some((cursor, mv)),
                            });
                        }
                    }
                    None if mv == Move::Down => {
                        let outcome = self.lock(core, &piece);
                        let next_index = tree.outcomes.len();
                        let index = *outcome_index.entry(outcome.clone()).or_insert(next_index);
                        if index == next_index {
                            tree.outcomes.push(outcome);
                        }
                        tree.locks.push(LockEdge {
                            node: cursor,
                            outcome: index,
                        });
                    }
                    None => {}
                }
            }
            cursor += 1;
        }

        log::trace!(
            "search from {:?}: {} poses, {} locks, {} outcomes",
            start,
            tree.nodes.len(),
            tree.locks.len(),
            tree.outcomes.len()
        );
        tree
    }

    /// Distinct lock outcomes reachable from `start`.
    pub fn explore(&self, core: &CoreState, start: Piece) -> Vec<CoreState> {
        self.search(core, start).into_outcomes()
    }

    /// Distinct lock outcomes for `piece_id` spawned into `well`. Scores start
    /// at zero, so each outcome's score is the number of lines it clears.
    pub fn reachable_locks(&self, well: &Well, piece_id: PieceId) -> Vec<CoreState> {
        let core = CoreState::new(well.clone());
        self.explore(&core, self.spawn(piece_id))
    }
}
