pub(crate) mod kind;

use std::fmt;

use crate::error::Diagnostic;
use crate::scanner::token::Token;
use kind::KindRef;

/// A child of a [`Node`]: either a nested node or a token.
#[derive(Clone, PartialEq)]
pub enum Element {
    Node(Node),
    Token(Token),
}

impl Element {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Element::Token(token) => Some(token),
            Element::Node(_) => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Element::Node(_))
    }

    /// Whether this element is a pure-whitespace token.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Element::Token(token) if token.is_whitespace())
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Element::Token(token) => out.push(token),
            Element::Node(node) => {
                for child in &node.exps {
                    child.collect_tokens(out);
                }
            }
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Node(node) => node.fmt(f),
            Element::Token(token) => token.fmt(f),
        }
    }
}

/// A parse-tree node: the kind that declared it, plus the child expressions
/// that actually matched, whitespace tokens included.
///
/// Nodes are created exclusively by the parse drivers and are immutable
/// once returned. A node's [`text`](Node::text) is exactly the slice of
/// input between its first and last token.
#[derive(Clone)]
pub struct Node {
    kind: KindRef,
    exps: Vec<Element>,
}

impl Node {
    pub(crate) fn new(kind: KindRef, exps: Vec<Element>) -> Self {
        Self { kind, exps }
    }

    /// The declaring kind.
    pub fn kind(&self) -> &KindRef {
        &self.kind
    }

    /// The declaring kind's name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// The matched children, in input order.
    pub fn exps(&self) -> &[Element] {
        &self.exps
    }

    pub fn into_exps(self) -> Vec<Element> {
        self.exps
    }

    /// Every token in this subtree, pre-order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        for child in &self.exps {
            child.collect_tokens(&mut tokens);
        }
        tokens
    }

    /// The children with pure-whitespace tokens filtered out.
    pub fn content_exps(&self) -> Vec<&Element> {
        self.exps
            .iter()
            .filter(|element| !element.is_whitespace())
            .collect()
    }

    /// Every non-whitespace token in this subtree, pre-order.
    pub fn content_tokens(&self) -> Vec<&Token> {
        self.tokens()
            .into_iter()
            .filter(|token| !token.is_whitespace())
            .collect()
    }

    /// Concatenation of all token values in order, whitespace preserved.
    pub fn text(&self) -> String {
        self.tokens()
            .iter()
            .map(|token| token.value())
            .collect()
    }

    /// Byte offset of the first token, or zero for an empty node.
    pub fn start(&self) -> usize {
        self.tokens().first().map_or(0, |token| token.start())
    }

    /// Byte offset one past the last token, or zero for an empty node.
    pub fn end(&self) -> usize {
        self.tokens().last().map_or(0, |token| token.end())
    }

    /// Line of the first token.
    pub fn line(&self) -> usize {
        self.tokens().first().map_or(0, |token| token.line())
    }

    /// Column of the first token.
    pub fn col(&self) -> usize {
        self.tokens().first().map_or(0, |token| token.col())
    }

    /// Smallest line index covered by this subtree.
    pub fn line_start(&self) -> usize {
        self.tokens()
            .iter()
            .map(|token| token.line())
            .min()
            .unwrap_or(0)
    }

    /// Largest line index covered by this subtree.
    pub fn line_end(&self) -> usize {
        self.tokens()
            .iter()
            .map(|token| token.line())
            .max()
            .unwrap_or(0)
    }

    /// Collect diagnostics for this subtree.
    ///
    /// The built-in validation reports one diagnostic per missing token —
    /// a placeholder left by an incomplete parse — positioned where the
    /// element should have started. The message is the failed expression's
    /// label when the grammar author provided one.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for token in self.tokens() {
            if token.is_missing() {
                let message = token.expected().unwrap_or("missing element");
                diagnostics.push(Diagnostic::new(message, token.line(), token.col()));
            }
        }
        diagnostics
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind.ptr_eq(&other.kind) && self.exps == other.exps
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn print(f: &mut fmt::Formatter<'_>, indent: usize, element: &Element) -> fmt::Result {
            write!(f, "{:indent$}", "")?;
            match element {
                Element::Node(node) => {
                    writeln!(f, "- {}@{}..{}", node.name(), node.start(), node.end())?;
                    for child in node.exps() {
                        print(f, indent + 4, child)?;
                    }
                    Ok(())
                }
                Element::Token(token) => writeln!(f, "- {token:?}"),
            }
        }

        writeln!(f, "- {}@{}..{}", self.name(), self.start(), self.end())?;
        for child in &self.exps {
            print(f, 4, child)?;
        }
        Ok(())
    }
}
