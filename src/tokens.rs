//! Token stream
//!
//! The lexical view of a parsed gruntfile. Every byte of the source belongs
//! to exactly one token, whitespace and comments included, so replaying the
//! stream reproduces the text exactly. Edits relink tokens in an arena; the
//! tree is only rebuilt when the session re-parses the replayed text.

use std::collections::HashMap;

use tree_sitter::{Node, Tree};

use crate::tree_sitter::descendants;

/// Index of a token in its stream's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Anonymous grammar leaf: brackets, commas, operators, keywords
    Punctuator,
    /// Named leaf: identifiers, numbers, string fragments
    Word,
    Comment,
    /// Horizontal whitespace
    Whitespace,
    LineBreak,
    /// Text spliced in by an edit
    Synthetic,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    prev: Option<TokenId>,
    next: Option<TokenId>,
}

impl Token {
    /// Whitespace or line break
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::LineBreak)
    }
}

/// Doubly linked token sequence over an index arena
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    arena: Vec<Token>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
    by_start: HashMap<usize, TokenId>,
    by_end: HashMap<usize, TokenId>,
}

impl TokenStream {
    /// Build the stream for `source` from the leaves of its tree
    pub fn from_tree(source: &str, tree: &Tree) -> Self {
        Self::from_node(source, tree.root_node())
    }

    /// Build the stream covering `source`, taking leaves from `root`
    pub fn from_node(source: &str, root: Node<'_>) -> Self {
        let mut stream = Self::default();
        let mut offset = 0;

        for leaf in descendants(root).filter(|n| n.child_count() == 0) {
            let (start, end) = (leaf.start_byte(), leaf.end_byte());
            // Zero-width leaves (automatic semicolons) carry no text
            if start == end || start < offset {
                continue;
            }
            if start > offset {
                stream.push_gap(&source[offset..start], offset);
            }

            let kind = if leaf.kind() == "comment" {
                TokenKind::Comment
            } else if leaf.is_named() {
                TokenKind::Word
            } else {
                TokenKind::Punctuator
            };
            stream.push_indexed(kind, &source[start..end], start);
            offset = end;
        }

        if offset < source.len() {
            stream.push_gap(&source[offset..], offset);
        }
        stream
    }

    /// Split uncovered text into whitespace, line breaks and raw words
    fn push_gap(&mut self, gap: &str, base: usize) {
        let mut rest = gap;
        let mut at = base;
        while !rest.is_empty() {
            let (kind, len) = if rest.starts_with("\r\n") {
                (TokenKind::LineBreak, 2)
            } else if rest.starts_with(['\n', '\r']) {
                (TokenKind::LineBreak, 1)
            } else if rest.starts_with([' ', '\t']) {
                let len = rest
                    .find(|c: char| c != ' ' && c != '\t')
                    .unwrap_or(rest.len());
                (TokenKind::Whitespace, len)
            } else {
                let len = rest
                    .find([' ', '\t', '\r', '\n'])
                    .unwrap_or(rest.len());
                (TokenKind::Word, len)
            };
            self.push_indexed(kind, &rest[..len], at);
            rest = &rest[len..];
            at += len;
        }
    }

    fn push_indexed(&mut self, kind: TokenKind, text: &str, start: usize) {
        let id = self.push(kind, text);
        self.by_start.insert(start, id);
        self.by_end.insert(start + text.len(), id);
    }

    fn push(&mut self, kind: TokenKind, text: &str) -> TokenId {
        let id = self.alloc(kind, text);
        self.arena[id.0].prev = self.tail;
        match self.tail {
            Some(tail) => self.arena[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    fn alloc(&mut self, kind: TokenKind, text: &str) -> TokenId {
        let id = TokenId(self.arena.len());
        self.arena.push(Token {
            kind,
            text: text.to_string(),
            prev: None,
            next: None,
        });
        id
    }

    pub fn get(&self, id: TokenId) -> &Token {
        &self.arena[id.0]
    }

    pub fn first(&self) -> Option<TokenId> {
        self.head
    }

    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.arena[id.0].next
    }

    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        self.arena[id.0].prev
    }

    /// Token that starts at byte `offset` of the parsed text
    ///
    /// Only meaningful for tokens of the generation the stream was built
    /// from; spliced tokens have no source offset.
    pub fn starting_at(&self, offset: usize) -> Option<TokenId> {
        self.by_start.get(&offset).copied()
    }

    /// Token that ends at byte `offset` of the parsed text
    pub fn ending_at(&self, offset: usize) -> Option<TokenId> {
        self.by_end.get(&offset).copied()
    }

    /// First and last token of a node
    pub fn node_bounds(&self, node: &Node) -> Option<(TokenId, TokenId)> {
        Some((
            self.starting_at(node.start_byte())?,
            self.ending_at(node.end_byte())?,
        ))
    }

    /// Insert a new token right after `anchor`
    pub fn insert_after(&mut self, anchor: TokenId, kind: TokenKind, text: &str) -> TokenId {
        let id = self.alloc(kind, text);
        let next = self.arena[anchor.0].next;

        self.arena[id.0].prev = Some(anchor);
        self.arena[id.0].next = next;
        self.arena[anchor.0].next = Some(id);
        match next {
            Some(next) => self.arena[next.0].prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    /// Insert `tokens` in order after `anchor`, returning the last inserted
    pub fn splice_after<'a, I>(&mut self, anchor: TokenId, tokens: I) -> TokenId
    where
        I: IntoIterator<Item = (TokenKind, &'a str)>,
    {
        tokens
            .into_iter()
            .fold(anchor, |at, (kind, text)| self.insert_after(at, kind, text))
    }

    /// Unlink every token from `first` through `last` inclusive
    ///
    /// `last` must be reachable from `first` by following `next`.
    pub fn remove_range(&mut self, first: TokenId, last: TokenId) {
        let before = self.arena[first.0].prev;
        let after = self.arena[last.0].next;

        match before {
            Some(before) => self.arena[before.0].next = after,
            None => self.head = after,
        }
        match after {
            Some(after) => self.arena[after.0].prev = before,
            None => self.tail = before,
        }
        self.arena[first.0].prev = None;
        self.arena[last.0].next = None;
    }

    /// Leading whitespace of the line `id` sits on
    pub fn line_indent(&self, id: TokenId) -> String {
        let mut line_start = id;
        while let Some(prev) = self.prev(line_start) {
            if self.get(prev).kind == TokenKind::LineBreak {
                break;
            }
            line_start = prev;
        }

        let first = self.get(line_start);
        if first.kind == TokenKind::Whitespace {
            first.text.clone()
        } else {
            String::new()
        }
    }

    /// Line break the source uses, by its first one; `\n` when there is none
    pub fn line_ending(&self) -> &str {
        self.iter()
            .find(|(_, token)| token.kind == TokenKind::LineBreak)
            .map_or("\n", |(_, token)| token.text.as_str())
    }

    /// Live tokens in order
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> + '_ {
        std::iter::successors(self.head, move |id| self.next(*id)).map(move |id| (id, self.get(id)))
    }

    /// Tokens from `first` through `last` inclusive
    pub fn range(&self, first: TokenId, last: TokenId) -> impl Iterator<Item = &Token> + '_ {
        std::iter::successors(Some(first), move |id| {
            if *id == last {
                None
            } else {
                self.next(*id)
            }
        })
        .map(move |id| self.get(id))
    }

    /// Replay the stream into source text
    pub fn to_text(&self) -> String {
        self.iter().map(|(_, token)| token.text.as_str()).collect()
    }
}
