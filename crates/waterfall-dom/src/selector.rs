//! Selector parsing and matching for `query_selector`.
//!
//! Supports type, class, id and universal selectors combined into compound
//! selectors (`div.card#first`), chained with the descendant (whitespace)
//! and child (`>`) combinators. Pseudo-classes, attribute selectors and
//! selector lists are rejected.

use waterfall_types::error::{Result, WaterfallError};

use crate::dom::{Document, NodeId};

/// A single, atomic selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Type selector: `div`.
    Type(String),
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#idname`.
    Id(String),
    /// Universal selector: `*`.
    Universal,
}

/// Combinator linking two compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `div p`
    Descendant,
    /// `div > p`
    Child,
}

/// Simple selectors that must all match the same element.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

/// A chain of compound selectors. Each entry stores the combinator that
/// preceded it (`None` for the first in the chain).
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<(CompoundSelector, Option<Combinator>)>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser {
            chars: input.trim().chars().collect(),
            pos: 0,
        };
        if parser.chars.is_empty() {
            return Err(WaterfallError::Selector("empty selector".into()));
        }

        let mut parts = vec![(parser.compound()?, None)];
        while !parser.at_eof() {
            let had_ws = parser.skip_whitespace();
            let combinator = if parser.peek() == Some('>') {
                parser.pos += 1;
                parser.skip_whitespace();
                Combinator::Child
            } else if had_ws {
                Combinator::Descendant
            } else {
                return Err(parser.unexpected(input));
            };
            parts.push((parser.compound()?, Some(combinator)));
        }
        Ok(Self { parts })
    }

    /// Check whether the element `node_id` matches this selector.
    pub fn matches(&self, doc: &Document, node_id: NodeId) -> bool {
        let Some((subject, _)) = self.parts.last() else {
            return false;
        };
        if !matches_compound(doc, node_id, subject) {
            return false;
        }

        // Walk the remaining compounds right-to-left towards the root.
        let mut current = node_id;
        for i in (0..self.parts.len() - 1).rev() {
            let compound = &self.parts[i].0;
            match self.parts[i + 1].1 {
                Some(Combinator::Child) => match parent_element(doc, current) {
                    Some(pid) if matches_compound(doc, pid, compound) => current = pid,
                    _ => return false,
                },
                Some(Combinator::Descendant) | None => {
                    let mut ancestor = parent_element(doc, current);
                    loop {
                        match ancestor {
                            Some(anc) if matches_compound(doc, anc, compound) => {
                                current = anc;
                                break;
                            },
                            Some(anc) => ancestor = parent_element(doc, anc),
                            None => return false,
                        }
                    }
                },
            }
        }
        true
    }
}

fn parent_element(doc: &Document, id: NodeId) -> Option<NodeId> {
    doc.parent(id).filter(|&p| doc.element(p).is_some())
}

fn matches_compound(doc: &Document, node_id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = doc.element(node_id) else {
        return false;
    };
    compound.parts.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.tag.as_str().eq_ignore_ascii_case(tag),
        SimpleSelector::Class(cls) => elem.has_class(cls),
        SimpleSelector::Id(id) => elem.id() == Some(id.as_str()),
    })
}

// -------------------------------------------------------------------
// Parser
// -------------------------------------------------------------------

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self, input: &str) -> WaterfallError {
        match self.peek() {
            Some(c) => WaterfallError::Selector(format!("unexpected '{c}' in \"{input}\"")),
            None => WaterfallError::Selector(format!("unexpected end of \"{input}\"")),
        }
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }

    fn compound(&mut self) -> Result<CompoundSelector> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Universal);
                },
                Some('.') => {
                    self.pos += 1;
                    let name = self.ident().ok_or_else(|| {
                        WaterfallError::Selector("expected class name after '.'".into())
                    })?;
                    parts.push(SimpleSelector::Class(name));
                },
                Some('#') => {
                    self.pos += 1;
                    let name = self
                        .ident()
                        .ok_or_else(|| WaterfallError::Selector("expected id after '#'".into()))?;
                    parts.push(SimpleSelector::Id(name));
                },
                Some(c) if c.is_alphabetic() && parts.is_empty() => {
                    // Only reachable with an identifier start, so never empty.
                    if let Some(name) = self.ident() {
                        parts.push(SimpleSelector::Type(name));
                    }
                },
                _ => break,
            }
        }
        if parts.is_empty() {
            let found = self.peek().map_or("end of input".to_string(), |c| format!("'{c}'"));
            return Err(WaterfallError::Selector(format!(
                "expected a selector, found {found}"
            )));
        }
        Ok(CompoundSelector { parts })
    }
}
