use chumsky::Parser;
use chumsky::prelude::{IterParser, any, choice, just};
use ustr::Ustr;

use crate::syntax::parse::{Sym, SyntaxErr, Token, TokenSet};
use crate::syntax::{Constant, Sort};
use crate::{Dialect, Spanned};

// λ, Λ and Π are alphabetic codepoints but reserved as binder keywords.
fn reserved(c: char) -> bool {
    matches!(c, 'λ' | 'Λ' | 'Π')
}

fn ident_start(c: char) -> bool {
    (c.is_alphabetic() || c == '_') && !reserved(c)
}

fn ident_continue(c: char) -> bool {
    (c.is_alphanumeric() || c == '_' || c == '\'') && !reserved(c)
}

/// Lexical analysis.
///
/// Identifiers are scanned by maximal munch and then reclassified: `TT`
/// is the ASCII spelling of `Π`, and `i`/`ι` are the base constant when
/// the dialect has constants at all. Spans are byte offsets.
pub(crate) fn lex<'s>(dialect: Dialect) -> impl Parser<'s, &'s str, TokenSet, SyntaxErr<'s, char>> {
    let ident = any()
        .filter(|c: &char| ident_start(*c))
        .then(any().filter(|c: &char| ident_continue(*c)).repeated())
        .to_slice()
        .map(move |text: &str| match text {
            "TT" => Token::Sym(Sym::Pi),
            "i" | "ι" if dialect.allow_constants => Token::Constant(Constant::Base),
            _ => Token::Ident(Ustr::from(text)),
        });

    let sort = just('*')
        .to(Sort::Type)
        .or(just('□').to(Sort::Universal))
        .map(Token::Sort);

    // Multi-character spellings come first so `::` and `->` win over
    // their single-character prefixes.
    let symbol = choice((
        just("::").to(Sym::Colon),
        just("->").to(Sym::Arrow),
        just('→').to(Sym::Arrow),
        just('⟶').to(Sym::Arrow),
        just('\\').to(Sym::Lambda),
        just('λ').to(Sym::Lambda),
        just('Λ').to(Sym::Lambda),
        just('Π').to(Sym::Pi),
        just('∀').to(Sym::Pi),
        just(':').to(Sym::Colon),
        just('.').to(Sym::Dot),
        just('(').to(Sym::LParen),
        just(')').to(Sym::RParen),
        just('[').to(Sym::LBracket),
        just(']').to(Sym::RBracket),
    ))
    .map(Token::Sym);

    let token = ident.or(sort).or(symbol);

    let line_comment = just("//")
        .then_ignore(any().and_is(just('\n').not()).repeated())
        .padded();
    // The earliest `*/` closes a block comment; a missing one fails the lex.
    let block_comment = just("/*")
        .then_ignore(any().and_is(just("*/").not()).repeated())
        .then_ignore(just("*/"))
        .padded();
    let comment = line_comment.or(block_comment);

    token
        .map_with(Spanned::from_map_extra)
        .padded_by(comment.repeated())
        .padded()
        .repeated()
        .collect()
}
