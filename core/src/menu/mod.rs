//! Menus: the letter-correspondence graph of a crib
//!
//! Nodes are the distinct letters of the plaintext and ciphertext, in order of
//! first appearance (plaintext first). Position i contributes an edge between
//! `plaintext[i]` and `ciphertext[i]`; positions joining the same pair of
//! letters, in either direction, are merged into one edge whose `compound`
//! counts them and whose label lists their 1-based positions.

pub mod cycles; // Path and cycle counting

use crate::alphabet::{Alphabet, AlphabetError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a menu
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("alphabet has {alphabet} symbols but stecker alphabet has {stecker}")]
    SteckerAlphabetMismatch { alphabet: usize, stecker: usize },

    #[error("plaintext has {plain} letters but ciphertext has {cipher}")]
    LengthMismatch { plain: usize, cipher: usize },

    #[error("crib is empty")]
    EmptyCrib,

    #[error("letter '{letter}' encodes to itself at position {position}")]
    SelfEncoding { position: usize, letter: char },

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
}

pub type MenuResult<T> = Result<T, MenuError>;

/// A letter of the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub letter: char,

    /// Index of the letter in the alphabet
    pub index: usize,

    /// Edges whose plaintext end is this letter
    pub outgoing: Vec<usize>,

    /// Edges whose ciphertext end is this letter
    pub incoming: Vec<usize>,

    /// Crib positions touching this letter
    pub edge_count: usize,
}

/// One or more crib positions joining the same two letters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEdge {
    /// Node of the plaintext letter that created the edge
    pub source: usize,

    /// Node of the ciphertext letter that created the edge
    pub target: usize,

    /// Comma separated 1-based crib positions, e.g. "3,4"
    pub label: String,

    /// Number of merged positions
    pub compound: usize,
}

/// Letter graph of a plaintext/ciphertext pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BombeMenu {
    alphabet: Alphabet,
    stecker_alphabet: Alphabet,
    plaintext: String,
    ciphertext: String,
    nodes: Vec<MenuNode>,
    edges: Vec<MenuEdge>,
}

impl BombeMenu {
    pub fn new(
        alphabet: &Alphabet,
        stecker_alphabet: &Alphabet,
        plaintext: &str,
        ciphertext: &str,
    ) -> MenuResult<Self> {
        // Validate everything before building
        if alphabet.len() != stecker_alphabet.len() {
            return Err(MenuError::SteckerAlphabetMismatch {
                alphabet: alphabet.len(),
                stecker: stecker_alphabet.len(),
            });
        }
        let plain = alphabet.indices(plaintext)?;
        let cipher = alphabet.indices(ciphertext)?;
        if plain.len() != cipher.len() {
            return Err(MenuError::LengthMismatch {
                plain: plain.len(),
                cipher: cipher.len(),
            });
        }
        if plain.is_empty() {
            return Err(MenuError::EmptyCrib);
        }
        for (position, (p, c)) in plain.iter().zip(&cipher).enumerate() {
            if p == c {
                return Err(MenuError::SelfEncoding {
                    position,
                    letter: alphabet.symbol(*p)?,
                });
            }
        }

        let mut menu = Self {
            alphabet: alphabet.clone(),
            stecker_alphabet: stecker_alphabet.clone(),
            plaintext: plaintext.to_string(),
            ciphertext: ciphertext.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };

        // Nodes in order of first appearance, plaintext first
        for &index in plain.iter().chain(&cipher) {
            if menu.node_of(index).is_none() {
                menu.nodes.push(MenuNode {
                    letter: alphabet.symbol(index)?,
                    index,
                    outgoing: Vec::new(),
                    incoming: Vec::new(),
                    edge_count: 0,
                });
            }
        }

        for (position, (&p, &c)) in plain.iter().zip(&cipher).enumerate() {
            let source = menu.node_of(p).ok_or(AlphabetError::IndexOutOfRange {
                index: p,
                size: alphabet.len(),
            })?;
            let target = menu.node_of(c).ok_or(AlphabetError::IndexOutOfRange {
                index: c,
                size: alphabet.len(),
            })?;
            menu.link(source, target, position + 1);
        }

        Ok(menu)
    }

    fn link(&mut self, source: usize, target: usize, position: usize) {
        let existing = self.edges.iter_mut().find(|e| {
            (e.source == source && e.target == target) || (e.source == target && e.target == source)
        });

        match existing {
            Some(edge) => {
                edge.label.push_str(&format!(",{}", position));
                edge.compound += 1;
            }
            None => {
                let id = self.edges.len();
                self.edges.push(MenuEdge {
                    source,
                    target,
                    label: position.to_string(),
                    compound: 1,
                });
                self.nodes[source].outgoing.push(id);
                self.nodes[target].incoming.push(id);
            }
        }

        self.nodes[source].edge_count += 1;
        self.nodes[target].edge_count += 1;
    }

    /// Node holding alphabet index `index`
    pub fn node_of(&self, index: usize) -> Option<usize> {
        self.nodes.iter().position(|n| n.index == index)
    }

    /// Node holding `letter`
    pub fn node_of_letter(&self, letter: char) -> Option<usize> {
        self.nodes.iter().position(|n| n.letter == letter)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn stecker_alphabet(&self) -> &Alphabet {
        &self.stecker_alphabet
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Crib length
    pub fn len(&self) -> usize {
        self.plaintext.chars().count()
    }

    /// Always false: empty cribs are rejected
    pub fn is_empty(&self) -> bool {
        self.plaintext.is_empty()
    }

    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[MenuEdge] {
        &self.edges
    }

    /// `(plaintext, ciphertext)` alphabet indices at crib position `position`
    pub fn link_at(&self, position: usize) -> Option<(usize, usize)> {
        let p = self.plaintext.chars().nth(position)?;
        let c = self.ciphertext.chars().nth(position)?;
        Some((self.alphabet.index_of(p).ok()?, self.alphabet.index_of(c).ok()?))
    }

    /// Whether two nodes share an edge
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.edges
            .iter()
            .any(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }

    /// Single connected component
    pub fn is_connected(&self) -> bool {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![0];
        visited[0] = true;

        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            let neighbours = node
                .outgoing
                .iter()
                .map(|&e| self.edges[e].target)
                .chain(node.incoming.iter().map(|&e| self.edges[e].source));
            for next in neighbours {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        visited.into_iter().all(|v| v)
    }

    /// Pick the test register and live wire, as alphabet indices
    ///
    /// The test register is the letter with the most crib positions (first
    /// appearance breaks ties). The live wire is the busiest letter not
    /// adjacent to it, or the second busiest letter when every letter is.
    pub fn choose_test_register(&self) -> (usize, usize) {
        let (register, live) = self.choose_test_register_nodes();
        (self.nodes[register].index, self.nodes[live].index)
    }

    fn choose_test_register_nodes(&self) -> (usize, usize) {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        // stable: ties keep first-appearance order
        order.sort_by(|a, b| self.nodes[*b].edge_count.cmp(&self.nodes[*a].edge_count));

        let register = order[0];
        let live = order[1..]
            .iter()
            .copied()
            .find(|&n| !self.adjacent(register, n))
            .unwrap_or(order[1]);

        (register, live)
    }

    /// Compact, serialisable view of the menu's metrics
    pub fn summary(&self) -> MenuSummary {
        let (test_register, live_wire) = self.choose_test_register_nodes();
        MenuSummary {
            plaintext: self.plaintext.clone(),
            ciphertext: self.ciphertext.clone(),
            letters: self.nodes.iter().map(|n| n.letter).collect(),
            edges: self.edges.clone(),
            cycle_classification: self.classify_cycles(),
            total_cycles: self.count_cycles(),
            connected: self.is_connected(),
            test_register: self.nodes[test_register].letter,
            live_wire: self.nodes[live_wire].letter,
        }
    }
}

/// Menu metrics for reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSummary {
    pub plaintext: String,
    pub ciphertext: String,
    pub letters: String,
    pub edges: Vec<MenuEdge>,
    pub cycle_classification: Vec<u64>,
    pub total_cycles: u64,
    pub connected: bool,
    pub test_register: char,
    pub live_wire: char,
}
