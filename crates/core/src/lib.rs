use chumsky::Parser;
use chumsky::error::Rich;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, MapExtra};
use chumsky::prelude::{SimpleSpan, end};
use thiserror::Error;

use crate::syntax::parse::Token;
use crate::syntax::parse::lex::lex;
use crate::syntax::parse::term::term;

pub mod syntax;


pub use syntax::{Constant, Sort, Term};

type Span = SimpleSpan;

/// Translate a byte offset into 1-based line and column numbers.
pub fn line_col(offset: usize, text: &str) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in text.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[derive(Debug, Clone)]
pub(crate) struct Spanned<T> {
    pub(crate) span: Span,
    pub(crate) item: T,
}

impl<T> Spanned<T> {
    pub(crate) fn from_map_extra<'src, 'b, I, E>(item: T, e: &mut MapExtra<'src, 'b, I, E>) -> Self
    where
        I: Input<'src, Span = Span>,
        E: ParserExtra<'src, I>,
    {
        Self {
            span: e.span(),
            item,
        }
    }
}

/// Which optional notations a parse accepts. One parser serves every
/// dialect of the family; the flags select the grammar paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub allow_sorts: bool,
    pub allow_constants: bool,
    pub allow_dependent_products: bool,
    pub allow_annotation: bool,
    pub allow_bracket_grouping: bool,
}

impl Dialect {
    pub const UNTYPED: Self = Self {
        allow_sorts: false,
        allow_constants: false,
        allow_dependent_products: false,
        allow_annotation: false,
        allow_bracket_grouping: false,
    };

    pub const SIMPLY_TYPED: Self = Self {
        allow_constants: true,
        allow_annotation: true,
        ..Self::UNTYPED
    };

    pub const SYSTEM_F: Self = Self {
        allow_constants: true,
        allow_annotation: true,
        allow_dependent_products: true,
        allow_bracket_grouping: true,
        ..Self::UNTYPED
    };

    pub const LAMBDA_OMEGA: Self = Self {
        allow_sorts: true,
        allow_constants: true,
        allow_annotation: true,
        ..Self::UNTYPED
    };

    pub const CALCULUS_OF_CONSTRUCTIONS: Self = Self {
        allow_sorts: true,
        allow_dependent_products: true,
        allow_annotation: true,
        ..Self::UNTYPED
    };

    /// Every notation at once.
    pub const FULL: Self = Self {
        allow_sorts: true,
        allow_constants: true,
        allow_dependent_products: true,
        allow_annotation: true,
        allow_bracket_grouping: true,
    };
}

impl Default for Dialect {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("lexical error at offset {offset}: {reason}")]
    Lex { offset: usize, reason: String },
    #[error("parse error at offset {offset}: expected {expected}, found {found}")]
    Parse {
        offset: usize,
        expected: String,
        found: String,
    },
}

impl Error {
    pub fn offset(&self) -> usize {
        match self {
            Self::Lex { offset, .. } | Self::Parse { offset, .. } => *offset,
        }
    }
}

type Out<T> = Result<T, Error>;

/// A single parse of one source buffer.
pub struct Ctx<'src> {
    text: &'src str,
    dialect: Dialect,
}

impl<'src> Ctx<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            dialect: Dialect::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn term(self) -> Out<Term> {
        let tokens = lex(self.dialect)
            .parse(self.text)
            .into_result()
            .map_err(lex_error)?;
        log::trace!(
            "lexed {} token(s) from {} byte(s)",
            tokens.tokens.len(),
            self.text.len()
        );
        term(self.dialect)
            .then_ignore(end())
            .parse(tokens.tokens.as_slice())
            .into_result()
            .map_err(|errs| parse_error(&tokens.spans, errs))
    }
}

/// Parse one term. Pure: the same text and dialect always produce the
/// same tree or the same error.
pub fn parse(text: &str, dialect: Dialect) -> Out<Term> {
    Ctx::new(text).with_dialect(dialect).term()
}

fn lex_error(errs: Vec<Rich<'_, char>>) -> Error {
    let (offset, reason) = errs
        .into_iter()
        .map(|e| (e.span().start, e.reason().to_string()))
        .next()
        .unwrap_or_default();
    Error::Lex { offset, reason }
}

fn parse_error(spans: &[Span], errs: Vec<Rich<'_, Token>>) -> Error {
    // Spans over the token stream are token indices; map them back to
    // byte offsets through the lexer's span table.
    let eof = spans.last().map(|s| s.end).unwrap_or(0);
    errs.into_iter()
        .map(|e| {
            let offset = spans.get(e.span().start).map(|s| s.start).unwrap_or(eof);
            let found = e
                .found()
                .map(ToString::to_string)
                .unwrap_or_else(|| "end of input".to_string());
            let mut expected = e
                .expected()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            if expected.is_empty() {
                expected = "a term".to_string();
            }
            Error::Parse {
                offset,
                expected,
                found,
            }
        })
        .next()
        .unwrap_or(Error::Parse {
            offset: eof,
            expected: "a term".to_string(),
            found: "end of input".to_string(),
        })
}
