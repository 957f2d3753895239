pub(crate) mod lex;
pub(crate) mod term;

use chumsky::Parser;
use chumsky::container::Container;
use chumsky::extra::Err as Full;
use chumsky::input::ValueInput;
use chumsky::prelude::Rich;
use chumsky::primitive::select;
use strum::Display;
use ustr::Ustr;

use crate::syntax::{Constant, Sort};
use crate::{Span, Spanned};

pub(crate) type SyntaxErr<'a, T> = Full<Rich<'a, T, Span>>;

/// Reserved symbols. The lexer folds every spelling of a symbol — ASCII
/// or Unicode — into one variant, so the grammar never sees spellings.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Display)]
pub(crate) enum Sym {
    #[strum(serialize = "λ")]
    Lambda,
    #[strum(serialize = "Π")]
    Pi,
    #[strum(serialize = "->")]
    Arrow,
    #[strum(serialize = ":")]
    Colon,
    #[strum(serialize = ".")]
    Dot,
    #[strum(serialize = "(")]
    LParen,
    #[strum(serialize = ")")]
    RParen,
    #[strum(serialize = "[")]
    LBracket,
    #[strum(serialize = "]")]
    RBracket,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Display)]
pub(crate) enum Token {
    #[strum(transparent)]
    Ident(Ustr),
    #[strum(transparent)]
    Sort(Sort),
    #[strum(transparent)]
    Constant(Constant),
    #[strum(transparent)]
    Sym(Sym),
}

/// Tokens plus their byte spans, kept in parallel so errors over the
/// token stream can be reported at source offsets.
#[derive(Default)]
pub(crate) struct TokenSet {
    pub(crate) spans: Vec<Span>,
    pub(crate) tokens: Vec<Token>,
}

impl Container<Spanned<Token>> for TokenSet {
    fn with_capacity(n: usize) -> Self {
        Self {
            spans: Vec::with_capacity(n),
            tokens: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, Spanned { span, item }: Spanned<Token>) {
        self.spans.push(span);
        self.tokens.push(item);
    }
}

pub(crate) fn ident<'t, I>() -> impl Parser<'t, I, Ustr, SyntaxErr<'t, Token>> + Clone
where
    I: ValueInput<'t, Token = Token, Span = Span>,
{
    select(|x, _| match x {
        Token::Ident(n) => Some(n),
        _ => None,
    })
    .labelled("identifier")
}
