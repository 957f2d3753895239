use chumsky::Parser;
use chumsky::input::ValueInput;
use chumsky::pratt::{infix, right};
use chumsky::prelude::{just, recursive};
use chumsky::primitive::select;

use crate::syntax::Term;
use crate::syntax::parse::{Sym, SyntaxErr, Token, ident};
use crate::{Dialect, Span};

/// The term grammar, tightest first: atoms, application, annotation,
/// product/arrow, binders. Binder bodies recurse on the whole grammar,
/// so a binder always extends as far right as possible.
///
/// Dialect gating happens in the `select`s: a disabled construct's token
/// simply fails to match and surfaces as an unexpected-token error.
pub(crate) fn term<'t, I>(d: Dialect) -> impl Parser<'t, I, Term, SyntaxErr<'t, Token>> + Clone
where
    I: ValueInput<'t, Token = Token, Span = Span>,
{
    recursive(|term| {
        let atom = select(move |x, _| match x {
            Token::Ident(n) => Some(Term::Variable(n)),
            Token::Sort(s) if d.allow_sorts => Some(Term::Sort(s)),
            Token::Constant(c) => Some(Term::Constant(c)),
            _ => None,
        })
        .labelled("term");

        let paren = term
            .clone()
            .delimited_by(just(Token::Sym(Sym::LParen)), just(Token::Sym(Sym::RParen)))
            .labelled("parenthesized term");

        // Brackets are a pure grouping synonym for parentheses.
        let bracket = select(move |x, _| match x {
            Token::Sym(Sym::LBracket) if d.allow_bracket_grouping => Some(()),
            _ => None,
        })
        .ignore_then(term.clone())
        .then_ignore(just(Token::Sym(Sym::RBracket)))
        .labelled("bracketed term");

        let primary = atom.or(paren).or(bracket);

        let app = primary
            .clone()
            .foldl(primary.repeated(), |lhs, rhs| {
                Term::Application(Box::new(lhs), Box::new(rhs))
            })
            .labelled("application");

        let ascribe = select(move |x, _| match x {
            Token::Sym(Sym::Colon) if d.allow_annotation => Some(()),
            _ => None,
        });

        // One ascription per level; nesting needs parentheses.
        let annot = app
            .clone()
            .then(ascribe.clone().ignore_then(app).or_not())
            .map(|(e, ty)| match ty {
                Some(ty) => Term::Annotation(Box::new(e), Box::new(ty)),
                None => e,
            });

        // `Π x: A. B`, or `Π A. B` when no binder name is given. The
        // name is committed only once its colon is seen, so `∀ x. B`
        // falls through to an unnamed product over the term `x`.
        let pi = select(move |x, _| match x {
            Token::Sym(Sym::Pi) if d.allow_dependent_products => Some(()),
            _ => None,
        })
        .ignore_then(
            ident()
                .then_ignore(just(Token::Sym(Sym::Colon)))
                .or_not()
                .then(term.clone()),
        )
        .then_ignore(just(Token::Sym(Sym::Dot)))
        .then(term.clone())
        .map(|((name, input), output)| Term::Product {
            name,
            input: Box::new(input),
            output: Box::new(output),
        })
        .labelled("dependent product");

        let lam = just(Token::Sym(Sym::Lambda))
            .ignore_then(ident())
            .then(ascribe.ignore_then(term.clone()).or_not())
            .then_ignore(just(Token::Sym(Sym::Dot)))
            .then(term)
            .map(|((bound, bind_type), body)| Term::Abstraction {
                bound,
                bind_type: bind_type.map(Box::new),
                body: Box::new(body),
            })
            .labelled("abstraction");

        let operand = lam.or(pi).or(annot);

        operand
            .pratt((infix(
                right(1),
                just(Token::Sym(Sym::Arrow)),
                |input, _, output, _| Term::Product {
                    name: None,
                    input: Box::new(input),
                    output: Box::new(output),
                },
            ),))
            .labelled("term")
    })
}
