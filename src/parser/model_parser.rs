#![allow(clippy::empty_docs)]
#[derive(Parser)]
#[grammar = "parser/model_grammar.pest"] // relative to src
pub struct ModelParser;

use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::{Parser, Position, Span};

use super::{Declaration, ModelDescription, StringSpan};
use crate::registry::MAX_ARRAY_LEN;
use crate::variable::{Value, VarKind};

type ParseResult<T> = Result<T, Box<Error<Rule>>>;

fn custom_error(message: String, span: Span) -> Box<Error<Rule>> {
    Box::new(Error::new_from_span(
        ErrorVariant::CustomError { message },
        span,
    ))
}

//kind = @{ ("real" | "integer" | "boolean" | "string") ~ !ident_char }
fn parse_kind(pair: Pair<Rule>) -> VarKind {
    match pair.as_str() {
        "real" => VarKind::Real,
        "integer" => VarKind::Integer,
        "boolean" => VarKind::Boolean,
        _ => VarKind::String,
    }
}

//array_len = { "[" ~ integer ~ "]" }
fn parse_array_len(pair: Pair<Rule>) -> ParseResult<usize> {
    let span = pair.as_span();
    let len = pair
        .into_inner()
        .next()
        .and_then(|n| n.as_str().parse::<usize>().ok())
        .filter(|&n| n > 0 && n <= MAX_ARRAY_LEN);
    len.ok_or_else(|| {
        custom_error(
            format!(
                "array length must be a positive integer no greater than {}",
                MAX_ARRAY_LEN
            ),
            span,
        )
    })
}

// literal = _{ boolean | string | real | integer }
// the literal must match the declared kind, integer literals are accepted for reals
fn parse_literal(pair: Pair<Rule>, kind: VarKind) -> ParseResult<Value> {
    let span = pair.as_span();
    let text = pair.as_str();
    let value = match (pair.as_rule(), kind) {
        (Rule::real, VarKind::Real) | (Rule::integer, VarKind::Real) => {
            text.parse::<f64>().ok().map(Value::Real)
        }
        (Rule::integer, VarKind::Integer) => text.parse::<i64>().ok().map(Value::Integer),
        (Rule::boolean, VarKind::Boolean) => Some(Value::Boolean(text == "true")),
        (Rule::string, VarKind::String) => pair
            .into_inner()
            .next()
            .map(|inner| Value::String(inner.as_str().to_string())),
        (rule, kind) => {
            return Err(custom_error(
                format!("{:?} literal cannot initialise a {} variable", rule, kind),
                span,
            ))
        }
    };
    value.ok_or_else(|| custom_error(format!("invalid {} literal {}", kind, text), span))
}

// declaration = { kind ~ name ~ array_len? ~ ("=" ~ literal)? ~ flag* ~ ";" }
fn parse_declaration(pair: Pair<Rule>) -> ParseResult<Declaration> {
    let span = StringSpan {
        pos_start: pair.as_span().start(),
        pos_end: pair.as_span().end(),
    };
    let mut kind = VarKind::Real;
    let mut name = "";
    let mut len = None;
    let mut start = None;
    let mut is_state = false;
    let mut is_discrete = false;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kind => kind = parse_kind(inner),
            Rule::name => name = inner.as_str(),
            Rule::array_len => len = Some(parse_array_len(inner)?),
            Rule::flag => match inner.as_str() {
                "state" => is_state = true,
                _ => is_discrete = true,
            },
            _ => start = Some(parse_literal(inner, kind)?),
        }
    }
    Ok(Declaration {
        name: name.to_string(),
        kind,
        len,
        start,
        is_state,
        is_discrete,
        span,
    })
}

// model = { "model" ~ name ~ "{" ~ declaration* ~ "}" }
fn parse_model(pair: Pair<Rule>) -> ParseResult<ModelDescription> {
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .map(|n| n.as_str().to_string())
        .unwrap_or_default();
    let declarations = inner.map(parse_declaration).collect::<ParseResult<Vec<_>>>()?;
    Ok(ModelDescription { name, declarations })
}

pub fn parse_string(text: &str) -> ParseResult<ModelDescription> {
    let main = ModelParser::parse(Rule::main, text)?;
    let model = main
        .flat_map(|main| main.into_inner())
        .find(|pair| pair.as_rule() == Rule::model);
    match model {
        Some(model) => parse_model(model),
        None => Err(Box::new(Error::new_from_pos(
            ErrorVariant::CustomError {
                message: "expected a model block".to_string(),
            },
            Position::from_start(text),
        ))),
    }
}
