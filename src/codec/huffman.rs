//! Huffman codec: a prefix code built from the message's own frequencies.
//!
//! ## Tree construction
//!
//! Leaves are created one per distinct symbol, ordered by descending
//! frequency with ties kept in order of first appearance. Then, until one
//! node remains, the working list is stable-sorted by ascending frequency,
//! the first two nodes are merged (first = edge `0`, second = edge `1`) and
//! the parent is appended to the end of the list. The stable sort is the
//! tie-break rule: changing it changes which symbol gets which code.
//!
//! ## Session requirement
//!
//! The tree is never written into the bit stream. A stream can only be
//! decoded by the codec instance that encoded it, or by one rebuilt from
//! its [`CodeBook`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::BitString;
use crate::error::{Result, SessionError, StegoError};
use crate::DELIMITER;

use super::{from_symbols, to_symbols, Codec, CodecKind};

/// Code book format version.
pub const CODE_BOOK_VERSION: u8 = 1;

/// Set of single-byte symbols, one bit per code point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SymbolSet([u64; 4]);

impl SymbolSet {
    fn single(symbol: u8) -> Self {
        let mut set = Self::default();
        set.0[(symbol >> 6) as usize] |= 1u64 << (symbol & 63);
        set
    }

    fn contains(&self, symbol: u8) -> bool {
        self.0[(symbol >> 6) as usize] & (1u64 << (symbol & 63)) != 0
    }

    fn union(&self, other: &Self) -> Self {
        let mut words = self.0;
        for (word, theirs) in words.iter_mut().zip(other.0) {
            *word |= theirs;
        }
        Self(words)
    }

    fn len(&self) -> u32 {
        self.0.iter().map(|word| word.count_ones()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Leaf(u8),
    Internal { left: usize, right: usize },
}

#[derive(Debug, Clone)]
struct Node {
    frequency: usize,
    symbols: SymbolSet,
    /// Edge label from the parent: `true` for `1`. Unused on the root.
    edge: bool,
    kind: NodeKind,
}

/// A Huffman tree stored as an arena of nodes addressed by index.
///
/// Leaves occupy the first indices, in leaf order. Internal nodes follow in
/// merge order, so the root is always the last node.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Builds a tree from `text` (which should already end with the delimiter).
    ///
    /// Returns `Ok(None)` for empty text.
    pub fn build(text: &str) -> Result<Option<Self>> {
        let symbols = to_symbols(text)?;
        Ok(Self::from_leaves(&frequency_table(&symbols)))
    }

    /// Builds a tree from an ordered leaf list.
    ///
    /// The leaf order is part of the tie-break, so the same list always
    /// yields the same codes.
    pub fn from_leaves(leaves: &[CodeBookEntry]) -> Option<Self> {
        let mut nodes: Vec<Node> = leaves
            .iter()
            .map(|entry| Node {
                frequency: entry.frequency,
                symbols: SymbolSet::single(entry.symbol),
                edge: false,
                kind: NodeKind::Leaf(entry.symbol),
            })
            .collect();

        let mut pending: Vec<usize> = (0..nodes.len()).collect();

        while pending.len() > 1 {
            // slice::sort_by_key is stable
            pending.sort_by_key(|&index| nodes[index].frequency);

            let (left, right) = (pending[0], pending[1]);
            nodes[left].edge = false;
            nodes[right].edge = true;

            nodes.push(Node {
                frequency: nodes[left]
                    .frequency
                    .saturating_add(nodes[right].frequency),
                symbols: nodes[left].symbols.union(&nodes[right].symbols),
                edge: false,
                kind: NodeKind::Internal { left, right },
            });

            pending.drain(..2);
            pending.push(nodes.len() - 1);
        }

        let root = *pending.first()?;
        Some(Self { nodes, root })
    }

    /// Number of distinct symbols (leaves).
    pub fn leaf_count(&self) -> usize {
        self.nodes[self.root].symbols.len() as usize
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sum of all leaf frequencies.
    pub fn total_frequency(&self) -> usize {
        self.nodes[self.root].frequency
    }

    /// Returns true if `symbol` has a leaf in this tree.
    pub fn contains(&self, symbol: u8) -> bool {
        self.nodes[self.root].symbols.contains(symbol)
    }

    /// Looks up the code of `symbol` by descending from the root.
    ///
    /// At each internal node the right child's symbol set is checked first.
    /// A tree made of a single leaf gives that leaf the 1-bit code `0`.
    pub fn find_code(&self, symbol: u8) -> Option<BitString> {
        let mut code = BitString::new();
        let mut index = self.root;

        if let NodeKind::Leaf(only) = self.nodes[index].kind {
            return (only == symbol).then(|| BitString::from(vec![false]));
        }

        loop {
            match self.nodes[index].kind {
                NodeKind::Leaf(_) => return Some(code),
                NodeKind::Internal { left, right } => {
                    if self.nodes[right].symbols.contains(symbol) {
                        code.push(true);
                        index = right;
                    } else if self.nodes[left].symbols.contains(symbol) {
                        code.push(false);
                        index = left;
                    } else {
                        return None;
                    }
                }
            }
        }
    }

    /// Walks the tree bit by bit until the delimiter leaf is reached.
    ///
    /// Every bit is consumed, including the last one. Running out of bits
    /// before the delimiter is [`StegoError::TruncatedData`].
    pub fn decode(&self, bits: &BitString) -> Result<String> {
        let mut text = Vec::new();
        let mut index = self.root;

        for bit in bits.iter() {
            if let NodeKind::Internal { left, right } = self.nodes[index].kind {
                index = if bit { right } else { left };
            }
            // A single-leaf root absorbs one bit per symbol.
            if let NodeKind::Leaf(symbol) = self.nodes[index].kind {
                if symbol == DELIMITER as u8 {
                    return Ok(from_symbols(&text));
                }
                text.push(symbol);
                index = self.root;
            }
        }

        Err(StegoError::TruncatedData { bits: bits.len() })
    }

    /// Lists every leaf with its code, left to right.
    pub fn code_table(&self) -> Vec<(char, BitString)> {
        let mut table = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![(self.root, BitString::new())];

        while let Some((index, code)) = stack.pop() {
            match self.nodes[index].kind {
                NodeKind::Leaf(symbol) if index == self.root => {
                    table.push((symbol as char, BitString::from(vec![false])));
                }
                NodeKind::Leaf(symbol) => table.push((symbol as char, code)),
                NodeKind::Internal { left, right } => {
                    for child in [right, left] {
                        let mut child_code = code.clone();
                        child_code.push(self.nodes[child].edge);
                        stack.push((child, child_code));
                    }
                }
            }
        }

        table
    }

    /// Exports the ordered leaf list that rebuilds this exact tree.
    pub fn code_book(&self) -> CodeBook {
        let leaves = self
            .nodes
            .iter()
            .filter_map(|node| match node.kind {
                NodeKind::Leaf(symbol) => Some(CodeBookEntry {
                    symbol,
                    frequency: node.frequency,
                }),
                NodeKind::Internal { .. } => None,
            })
            .collect();
        CodeBook {
            version: CODE_BOOK_VERSION,
            leaves,
        }
    }
}

/// Counts symbols and orders them by descending frequency.
///
/// Ties keep the order in which symbols first appear in `symbols`.
pub fn frequency_table(symbols: &[u8]) -> Vec<CodeBookEntry> {
    let mut counts = [0usize; 256];
    let mut first_seen = Vec::new();

    for &symbol in symbols {
        if counts[symbol as usize] == 0 {
            first_seen.push(symbol);
        }
        counts[symbol as usize] += 1;
    }

    let mut table: Vec<CodeBookEntry> = first_seen
        .into_iter()
        .map(|symbol| CodeBookEntry {
            symbol,
            frequency: counts[symbol as usize],
        })
        .collect();
    table.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    table
}

/// One leaf of a serialized tree.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBookEntry {
    pub symbol: u8,
    pub frequency: usize,
}

/// Ordered leaf list from which a [`HuffmanTree`] can be rebuilt exactly.
///
/// Stored as JSON next to the stego image. It is not part of the pixel data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    pub version: u8,
    pub leaves: Vec<CodeBookEntry>,
}

impl CodeBook {
    /// Checks that the book can rebuild a usable tree.
    pub fn validate(&self) -> Result<()> {
        if self.version != CODE_BOOK_VERSION {
            return Err(StegoError::CodeBook(format!(
                "unsupported version {} (expected {})",
                self.version, CODE_BOOK_VERSION
            )));
        }
        if self.leaves.is_empty() {
            return Err(StegoError::CodeBook("no leaves".to_string()));
        }

        let mut seen = SymbolSet::default();
        let mut total: usize = 0;
        for entry in &self.leaves {
            if entry.frequency == 0 {
                return Err(StegoError::CodeBook(format!(
                    "symbol {:?} has zero frequency",
                    entry.symbol as char
                )));
            }
            if seen.contains(entry.symbol) {
                return Err(StegoError::CodeBook(format!(
                    "symbol {:?} listed twice",
                    entry.symbol as char
                )));
            }
            seen = seen.union(&SymbolSet::single(entry.symbol));
            // The root carries the total, so every internal node fits if it does.
            total = total
                .checked_add(entry.frequency)
                .ok_or_else(|| StegoError::CodeBook("total frequency overflows".to_string()))?;
        }
        if !seen.contains(DELIMITER as u8) {
            return Err(StegoError::CodeBook("delimiter leaf missing".to_string()));
        }
        Ok(())
    }

    /// Loads a code book from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let book: CodeBook = serde_json::from_str(&content)?;
        book.validate()?;
        Ok(book)
    }

    /// Saves the code book as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Huffman codec holding the tree from its last `encode`.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    tree: Option<HuffmanTree>,
}

impl HuffmanCodec {
    /// Creates a codec with no tree. `decode` fails until `encode` runs.
    pub fn new() -> Self {
        Self { tree: None }
    }

    /// Rebuilds the codec that produced `book`.
    pub fn from_code_book(book: &CodeBook) -> Result<Self> {
        book.validate()?;
        Ok(Self {
            tree: HuffmanTree::from_leaves(&book.leaves),
        })
    }

    /// The tree built by the last `encode`, if any.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Symbol codes of the current tree. Empty before the first `encode`.
    pub fn code_table(&self) -> Vec<(char, BitString)> {
        self.tree
            .as_ref()
            .map(HuffmanTree::code_table)
            .unwrap_or_default()
    }

    /// Code book of the current tree.
    pub fn code_book(&self) -> Option<CodeBook> {
        self.tree.as_ref().map(HuffmanTree::code_book)
    }
}

impl Codec for HuffmanCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Huffman
    }

    fn encode(&mut self, text: &str) -> Result<BitString> {
        let symbols = to_symbols(text)?;
        self.tree = HuffmanTree::from_leaves(&frequency_table(&symbols));
        let Some(tree) = self.tree.as_ref() else {
            return Ok(BitString::new());
        };

        debug!(
            leaves = tree.leaf_count(),
            nodes = tree.node_count(),
            "Huffman tree built"
        );

        let mut codes: HashMap<u8, BitString> = HashMap::new();
        let mut bits = BitString::new();
        for symbol in symbols {
            if !codes.contains_key(&symbol) {
                let code = tree.find_code(symbol).ok_or_else(|| {
                    StegoError::Internal(format!(
                        "symbol {:?} missing from the Huffman tree built from it",
                        symbol as char
                    ))
                })?;
                codes.insert(symbol, code);
            }
            bits.extend_from(&codes[&symbol]);
        }
        Ok(bits)
    }

    fn decode(&self, bits: &BitString) -> Result<String> {
        self.tree
            .as_ref()
            .ok_or(SessionError::MissingTree)?
            .decode(bits)
    }

    fn clone_box(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }

    fn as_huffman(&self) -> Option<&HuffmanCodec> {
        Some(self)
    }
}
