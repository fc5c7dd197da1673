use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::Game;
use crate::score::OutcomePolicy;
use crate::stone::Stone;
use crate::territory::ScoringTechnique;
use crate::turn::Move;

pub type NodeId = usize;

/// One move reached by a specific path from the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub mv: Move,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub value: f64,
    pub depth: usize,
}

/// Which end of the value range `best_child` looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Highest,
    Lowest,
}

impl Criterion {
    /// Values are stored from Black's point of view, so White minimises.
    pub fn for_player(stone: Stone) -> Self {
        match stone {
            Stone::Black => Criterion::Highest,
            Stone::White => Criterion::Lowest,
        }
    }

    fn prefers(self, candidate: f64, best: f64) -> bool {
        match self {
            Criterion::Highest => candidate > best,
            Criterion::Lowest => candidate < best,
        }
    }
}

/// How internal node values are recomputed from their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Aggregation {
    /// Mean of the direct children.
    #[default]
    Mean,
    /// Maximum where `player` is to move, mean elsewhere.
    Minimax { player: Stone },
}

/// A trie of move sequences with an outcome value on every node.
///
/// Nodes live in an arena; node 0 is the root and holds [`Move::START`].
/// Children are kept in insertion order and always have a larger id than
/// their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
}

impl GameTree {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode {
                mv: Move::START,
                parent: None,
                children: Vec::new(),
                value: 0.0,
                depth: 0,
            }],
        }
    }

    // -- Accessors --

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes[id].value
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id].depth
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id].children.is_empty()
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no sequence has been inserted below the root.
    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    // -- Lookup --

    /// Direct child of `parent` holding `mv`.
    pub fn find_child(&self, parent: NodeId, mv: &Move) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes[id].mv == *mv)
    }

    /// Follow `moves` from the root. `None` as soon as one step is missing.
    pub fn find_path(&self, moves: &[Move]) -> Option<NodeId> {
        moves
            .iter()
            .try_fold(Self::ROOT, |node, mv| self.find_child(node, mv))
    }

    /// The child of `parent` whose value best matches `criterion`.
    /// Ties go to the child inserted first.
    pub fn best_child(&self, parent: NodeId, criterion: Criterion) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &id in &self.nodes[parent].children {
            match best {
                Some(b) if !criterion.prefers(self.nodes[id].value, self.nodes[b].value) => {}
                _ => best = Some(id),
            }
        }
        best
    }

    /// Walk parent links from node to root, return path (root-first order, root excluded).
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            if n == Self::ROOT {
                break;
            }
            path.push(n);
            current = self.nodes[n].parent;
        }
        path.reverse();
        path
    }

    /// The sequence of moves from the root to the given node.
    pub fn moves_to(&self, id: NodeId) -> Vec<Move> {
        self.path_to(id)
            .iter()
            .map(|&n| self.nodes[n].mv)
            .collect()
    }

    // -- Mutation --

    /// Insert a move sequence below the root and store `outcome` on its last node.
    ///
    /// Missing nodes are created with `outcome` as their initial value; nodes
    /// that already existed along the way keep their value until the next
    /// aggregation pass. An empty sequence stores `outcome` on the root.
    pub fn insert_sequence(&mut self, moves: &[Move], outcome: f64) -> NodeId {
        let mut current = Self::ROOT;
        let mut created = 0;
        for mv in moves {
            current = match self.find_child(current, mv) {
                Some(id) => id,
                None => {
                    created += 1;
                    self.add_child(current, *mv, outcome)
                }
            };
        }
        self.nodes[current].value = outcome;

        debug!(len = moves.len(), created, outcome, "inserted sequence");
        current
    }

    /// Insert a finished game and refresh the aggregated values.
    pub fn insert_game(
        &mut self,
        game: &Game,
        policy: OutcomePolicy,
        technique: ScoringTechnique,
    ) -> NodeId {
        let leaf = self.insert_sequence(game.moves(), game.outcome(policy, technique));
        self.update_aggregate_values();
        leaf
    }

    /// Recompute every internal node as the mean of its children. Leaves are untouched.
    pub fn update_aggregate_values(&mut self) {
        self.update_aggregate_values_with(Aggregation::Mean);
    }

    /// Bottom-up recomputation of internal node values.
    pub fn update_aggregate_values_with(&mut self, aggregation: Aggregation) {
        // Children always have larger ids than their parent, so reverse id
        // order visits every child before the node itself.
        for id in (0..self.nodes.len()).rev() {
            let node = &self.nodes[id];
            if node.children.is_empty() {
                continue;
            }

            let values = node.children.iter().map(|&c| self.nodes[c].value);
            let to_move = Stone::for_turn(node.mv.turn + 1);
            let value = match aggregation {
                Aggregation::Minimax { player } if to_move == Some(player) => {
                    values.fold(f64::NEG_INFINITY, f64::max)
                }
                _ => values.sum::<f64>() / node.children.len() as f64,
            };
            self.nodes[id].value = value;
        }
    }

    fn add_child(&mut self, parent: NodeId, mv: Move, value: f64) -> NodeId {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(TreeNode {
            mv,
            parent: Some(parent),
            children: Vec::new(),
            value,
            depth,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Structural check for trees that come from outside, e.g. a file.
    ///
    /// Every node but the root is listed exactly once by its parent, sits one
    /// level below it, and no two siblings hold the same move.
    pub fn is_well_formed(&self) -> bool {
        let Some(root) = self.nodes.first() else {
            return false;
        };
        if root.parent.is_some() || !root.mv.is_start() || root.depth != 0 {
            return false;
        }

        self.nodes.iter().enumerate().all(|(id, node)| {
            let parent_ok = match node.parent {
                None => id == Self::ROOT,
                Some(p) => p < id && self.nodes[p].children.contains(&id),
            };

            let mut ids = HashSet::with_capacity(node.children.len());
            let mut moves = HashSet::with_capacity(node.children.len());
            let children_ok = node.children.iter().all(|&c| {
                c > id
                    && c < self.nodes.len()
                    && self.nodes[c].parent == Some(id)
                    && self.nodes[c].depth == node.depth + 1
                    && ids.insert(c)
                    && moves.insert(self.nodes[c].mv)
            });
            parent_ok && children_ok
        })
    }

    /// Indented outline of the tree, one node per line, stopping below `max_depth`.
    pub fn write_outline<W: fmt::Write>(&self, out: &mut W, max_depth: Option<usize>) -> fmt::Result {
        let mut stack = vec![(Self::ROOT, 0)];
        while let Some((id, level)) = stack.pop() {
            let node = &self.nodes[id];
            let desc = match node.mv.stone() {
                None => "Game start:",
                Some(Stone::Black) => "Black's move:",
                Some(Stone::White) => "White's move:",
            };
            writeln!(out, "{}{desc} {} ({})", "  ".repeat(level), node.mv, node.value)?;
            if max_depth.is_none_or(|max| level < max) {
                stack.extend(node.children.iter().rev().map(|&c| (c, level + 1)));
            }
        }
        Ok(())
    }
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, None)
    }
}
