use std::fmt::{Display, Formatter, Result as FmtResult};

use ustr::Ustr;

pub(crate) mod parse;

/// Universe markers of the dependently-typed notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// `*`, the sort of types.
    Type,
    /// `□`, the sort of kinds.
    Universal,
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Type => "*",
            Self::Universal => "□",
        })
    }
}

/// The base-type literal `ι` of the simply-typed notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Base,
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ι")
    }
}

/// One node of the term tree. No binding resolution happens at this
/// layer; variables are plain names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Variable(Ustr),
    Sort(Sort),
    Constant(Constant),
    Abstraction {
        bound: Ustr,
        bind_type: Option<Box<Term>>,
        body: Box<Term>,
    },
    /// Left-associative: `a b c` is `(a b) c`.
    Application(Box<Term>, Box<Term>),
    /// Explicit ascription `e : T`.
    Annotation(Box<Term>, Box<Term>),
    /// Dependent product `Π x: A. B`, or the arrow `A -> B` when `name`
    /// is absent.
    Product {
        name: Option<Ustr>,
        input: Box<Term>,
        output: Box<Term>,
    },
}

impl Term {
    fn is_leaf(&self) -> bool {
        matches!(self, Self::Variable(_) | Self::Sort(_) | Self::Constant(_))
    }
}

/// Canonical rendering. Prints enough parentheses that reparsing the
/// output under [`crate::Dialect::FULL`] reproduces the tree.
impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Variable(x) => x.fmt(f),
            Self::Sort(s) => s.fmt(f),
            Self::Constant(c) => c.fmt(f),
            Self::Abstraction {
                bound,
                bind_type: Some(ty),
                body,
            } => write!(f, "λ{bound}: {ty}. {body}"),
            Self::Abstraction {
                bound,
                bind_type: None,
                body,
            } => write!(f, "λ{bound}. {body}"),
            Self::Annotation(e, ty) => {
                write_arg(e, f)?;
                write!(f, " : ")?;
                write_arg(ty, f)
            }
            Self::Product {
                name: Some(x),
                input,
                output,
            } => write!(f, "Π{x}: {input}. {output}"),
            Self::Product {
                name: None,
                input,
                output,
            } => {
                write_arg(input, f)?;
                write!(f, " -> {output}")
            }
            Self::Application(t, u) => {
                write_func(t, f)?;
                write!(f, " ")?;
                write_arg(u, f)
            }
        }
    }
}

// Application chains stay bare on the function side; everything else
// non-leaf gets parenthesized.
fn write_func(t: &Term, f: &mut Formatter<'_>) -> FmtResult {
    match t {
        Term::Application(..) => t.fmt(f),
        _ => write_arg(t, f),
    }
}

fn write_arg(t: &Term, f: &mut Formatter<'_>) -> FmtResult {
    if t.is_leaf() {
        t.fmt(f)
    } else {
        write!(f, "({t})")
    }
}
