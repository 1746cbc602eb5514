#![doc = include_str!("../README.md")]

mod bamboo;
mod error;
mod grammar;
mod limit;
mod node;
mod parser;
mod scanner;
#[cfg(test)]
mod tests;

pub use crate::bamboo::BambooString;
pub use crate::error::{Diagnostic, GrammarError};
pub use crate::grammar::{
    alt, group, kind, lazy, limits, lit, pat, GrammarExpr, Lexeme, Limits, Pattern, Shape,
    ShapeItem,
};
pub use crate::limit::LimitTracker;
pub use crate::node::kind::{KindRef, NodeKind};
pub use crate::node::{Element, Node};
pub use crate::scanner::token::Token;
pub use crate::scanner::{CachedParse, Scanner};
