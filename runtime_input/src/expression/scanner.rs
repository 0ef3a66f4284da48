//! Splits the text after the sentinel into `name(arguments)` fragments

use super::error::{ExpressionError, ExpressionResult};
use super::grammar::{ArgumentScan, FunctionName, FunctionSet, LINE_TERMINATORS, RUNTIME_INPUT_VALUE};
use super::parser::ParseOptions;
use crate::config::compile_time::expression::{MAX_ARGUMENT_DEPTH, MAX_FUNCTION_CALLS};
use crate::utils::Span;

/// One decoded `.name(arguments)` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCall<'a> {
    pub name: FunctionName,
    /// Raw argument text between the parentheses
    pub arguments: &'a str,
    /// Covers the leading `.` through the closing `)`
    pub span: Span,
}

/// Scan every function call of `input`.
///
/// `input` must already start with the runtime input sentinel. The lenient
/// scan accepts any call count the grammar does; the balanced scan is capped
/// at `MAX_FUNCTION_CALLS`.
pub fn scan_function_calls<'a>(
    input: &'a str,
    options: &ParseOptions,
) -> ExpressionResult<Vec<FunctionCall<'a>>> {
    debug_assert!(input.starts_with(RUNTIME_INPUT_VALUE));

    match options.argument_scan {
        ArgumentScan::Lenient => scan_lenient(input, options.functions),
        ArgumentScan::Balanced => {
            let calls = scan_balanced(input, options.functions)?;
            if calls.len() > MAX_FUNCTION_CALLS {
                return Err(ExpressionError::TooManyFunctionCalls {
                    count: calls.len(),
                    limit: MAX_FUNCTION_CALLS,
                });
            }
            Ok(calls)
        }
    }
}

// ============================================================================
// LENIENT SCAN (stored-format compatible)
// ============================================================================

fn scan_lenient(input: &str, functions: FunctionSet) -> ExpressionResult<Vec<FunctionCall<'_>>> {
    if !functions.grammar().is_match(input) {
        return Err(diagnose(input, functions));
    }

    let boundaries = call_boundaries(input, functions);
    let mut calls = Vec::with_capacity(boundaries.len());

    for (index, &(begin, name)) in boundaries.iter().enumerate() {
        let end = boundaries
            .get(index + 1)
            .map(|(next, _)| *next)
            .unwrap_or(input.len());

        // Skip ".name("
        let args_start = begin + 1 + name.as_str().len() + 1;
        let args_end = if input[..end].ends_with(')') {
            end - 1
        } else {
            end
        };

        calls.push(FunctionCall {
            name,
            arguments: &input[args_start..args_end.max(args_start)],
            span: Span::from_offsets(input, begin, end),
        });
    }

    Ok(calls)
}

/// Offsets of every `.` that is directly followed by `name(` for a name in
/// the function set. The grammar check guarantees the first one sits right
/// after the sentinel.
fn call_boundaries(input: &str, functions: FunctionSet) -> Vec<(usize, FunctionName)> {
    let body_start = RUNTIME_INPUT_VALUE.len();

    input[body_start..]
        .match_indices('.')
        .filter_map(|(relative, _)| {
            let offset = body_start + relative;
            let rest = &input[offset + 1..];
            functions
                .functions()
                .iter()
                .copied()
                .find(|name| {
                    rest.starts_with(name.as_str()) && rest[name.as_str().len()..].starts_with('(')
                })
                .map(|name| (offset, name))
        })
        .collect()
}

/// Explain why `input` failed the full-match grammar
fn diagnose(input: &str, functions: FunctionSet) -> ExpressionError {
    let body_start = RUNTIME_INPUT_VALUE.len();
    let body = &input[body_start..];

    if let Some((relative, ch)) = body
        .char_indices()
        .find(|(_, ch)| LINE_TERMINATORS.contains(ch))
    {
        let offset = body_start + relative;
        return ExpressionError::grammar_mismatch(
            "line break inside expression",
            Span::from_offsets(input, offset, offset + ch.len_utf8()),
        );
    }

    if !body.starts_with('.') {
        let width = body.chars().next().map(char::len_utf8).unwrap_or(0);
        return ExpressionError::grammar_mismatch(
            "expected '.' after <+input>",
            Span::from_offsets(input, body_start, body_start + width),
        );
    }

    let name_start = body_start + 1;
    let name_len = input[name_start..]
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(input.len() - name_start);
    let name_end = name_start + name_len;
    let name = &input[name_start..name_end];
    let name_span = Span::from_offsets(input, name_start, name_end);

    if !input[name_end..].starts_with('(') {
        return ExpressionError::grammar_mismatch("expected '(' after function name", name_span);
    }

    let supported = FunctionName::from_name(name)
        .map(|function| functions.supports(function))
        .unwrap_or(false);
    if !supported {
        return ExpressionError::unsupported_function(name, name_span);
    }

    if !input.ends_with(')') {
        let last = input.char_indices().last().map(|(i, _)| i).unwrap_or(0);
        return ExpressionError::grammar_mismatch(
            "expression must end with ')'",
            Span::from_offsets(input, last, input.len()),
        );
    }

    ExpressionError::grammar_mismatch(
        "malformed function call",
        Span::from_offsets(input, body_start, input.len()),
    )
}

// ============================================================================
// BALANCED SCAN
// ============================================================================

fn scan_balanced(input: &str, functions: FunctionSet) -> ExpressionResult<Vec<FunctionCall<'_>>> {
    let mut calls: Vec<FunctionCall<'_>> = Vec::new();
    let mut pos = RUNTIME_INPUT_VALUE.len();

    while pos < input.len() {
        let call_start = pos;

        if !input[pos..].starts_with('.') {
            let width = input[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
            let span = Span::from_offsets(input, pos, pos + width);
            return Err(match (input[pos..].starts_with(')'), calls.last()) {
                (true, Some(previous)) => {
                    ExpressionError::unbalanced_arguments(previous.name.as_str(), span)
                }
                _ => ExpressionError::grammar_mismatch("expected '.' before function call", span),
            });
        }

        let name_start = pos + 1;
        let name_len = input[name_start..]
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(input.len() - name_start);
        let name_end = name_start + name_len;
        let name = &input[name_start..name_end];
        let name_span = Span::from_offsets(input, name_start, name_end);

        if !input[name_end..].starts_with('(') {
            return Err(ExpressionError::grammar_mismatch(
                "expected '(' after function name",
                name_span,
            ));
        }

        let function = FunctionName::from_name(name)
            .filter(|function| functions.supports(*function))
            .ok_or_else(|| ExpressionError::unsupported_function(name, name_span))?;

        let args_start = name_end + 1;
        let close = find_closing_paren(input, args_start, function, call_start)?;

        calls.push(FunctionCall {
            name: function,
            arguments: &input[args_start..close],
            span: Span::from_offsets(input, call_start, close + 1),
        });
        pos = close + 1;
    }

    Ok(calls)
}

/// Offset of the `)` that closes the call whose arguments start at `args_start`
fn find_closing_paren(
    input: &str,
    args_start: usize,
    function: FunctionName,
    call_start: usize,
) -> ExpressionResult<usize> {
    let mut depth = 1usize;

    for (relative, ch) in input[args_start..].char_indices() {
        let offset = args_start + relative;
        if LINE_TERMINATORS.contains(&ch) {
            return Err(ExpressionError::grammar_mismatch(
                "line break inside expression",
                Span::from_offsets(input, offset, offset + ch.len_utf8()),
            ));
        }
        match ch {
            '(' => {
                depth += 1;
                if depth > MAX_ARGUMENT_DEPTH {
                    return Err(ExpressionError::unbalanced_arguments(
                        function.as_str(),
                        Span::from_offsets(input, call_start, offset + 1),
                    ));
                }
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(offset);
                }
            }
            _ => {}
        }
    }

    Err(ExpressionError::unbalanced_arguments(
        function.as_str(),
        Span::from_offsets(input, call_start, input.len()),
    ))
}
