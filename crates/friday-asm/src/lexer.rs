//! Line-oriented lexer for assembly sources.
//!
//! Tokens carry byte spans into the source; text is sliced out on demand.
//! Comments and horizontal whitespace are dropped, and the stream is cut
//! into [`SourceLine`]s at newlines.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\x0B\x0C]+")]
pub enum TokenKind {
    /// Mnemonic, operand, label definition, or directive.
    #[regex(r"[^\s#,]+", allow_greedy = true)]
    Word,

    #[token(",")]
    Comma,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    #[token("\n")]
    Newline,

    /// Characters the lexer could not place, coalesced.
    Garbage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokens of one source line, comments removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number.
    pub number: usize,
    /// Span of the whole line, newline excluded.
    pub span: Range<usize>,
    pub tokens: Vec<Token>,
}

impl SourceLine {
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split `source` into lines of tokens.
pub fn lex(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut current = SourceLine {
        number: 1,
        span: 0..0,
        tokens: Vec::new(),
    };
    let mut garbage: Option<Range<usize>> = None;
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();

        let kind = match result {
            Ok(kind) => kind,
            Err(()) => {
                match &mut garbage {
                    Some(range) if range.end == span.start => range.end = span.end,
                    _ => {
                        flush_garbage(&mut garbage, &mut current);
                        garbage = Some(span);
                    }
                }
                continue;
            }
        };
        flush_garbage(&mut garbage, &mut current);

        match kind {
            TokenKind::Comment => {}
            TokenKind::Newline => {
                let next_start = span.end;
                current.span.end = span.start;
                let number = current.number + 1;
                lines.push(std::mem::replace(
                    &mut current,
                    SourceLine {
                        number,
                        span: next_start..next_start,
                        tokens: Vec::new(),
                    },
                ));
            }
            kind => current.tokens.push(Token { kind, span }),
        }
    }

    flush_garbage(&mut garbage, &mut current);
    current.span.end = source.len();
    if current.span.start < source.len() || !current.tokens.is_empty() {
        lines.push(current);
    }

    lines
}

fn flush_garbage(garbage: &mut Option<Range<usize>>, line: &mut SourceLine) {
    if let Some(span) = garbage.take() {
        line.tokens.push(Token {
            kind: TokenKind::Garbage,
            span,
        });
    }
}

/// Text of a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.clone()]
}
