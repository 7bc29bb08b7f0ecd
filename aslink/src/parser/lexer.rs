//! Line scanner and token cursor for assembly source

use std::io::Read;

use crate::error::AsmError;

/// A non-blank source line: its 1-based number and normalized tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Line {
    number: usize,
    tokens: Vec<String>,
}

/// Forward-only cursor over the whitespace-separated tokens of a source.
///
/// Blank lines are dropped at construction, so every stored line holds at
/// least one token and `peek`/`advance` cross line boundaries freely.
#[derive(Clone, Debug)]
pub struct TokenStream {
    lines: Vec<Line>,
    line: usize,
    col: usize,
    last_line: usize,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        let lines = source
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let tokens = combine_tokens(raw.split_whitespace().map(str::to_string));
                (!tokens.is_empty()).then(|| Line {
                    number: idx + 1,
                    tokens,
                })
            })
            .collect();
        Self {
            lines,
            line: 0,
            col: 0,
            last_line: 0,
        }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, AsmError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::new(&source))
    }

    /// Position of the next token, without moving the cursor.
    fn next_pos(&self) -> Option<(usize, usize)> {
        let current = self.lines.get(self.line)?;
        if self.col < current.tokens.len() {
            Some((self.line, self.col))
        } else if self.line + 1 < self.lines.len() {
            Some((self.line + 1, 0))
        } else {
            None
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_pos().is_some()
    }

    pub fn peek(&self) -> Option<&str> {
        let (line, col) = self.next_pos()?;
        Some(self.lines[line].tokens[col].as_str())
    }

    pub fn advance(&mut self) -> Option<String> {
        let (line, col) = self.next_pos()?;
        self.line = line;
        self.col = col + 1;
        self.last_line = self.lines[line].number;
        Some(self.lines[line].tokens[col].clone())
    }

    /// Join the remaining tokens of the current line and move to the next one.
    pub fn rest_of_line(&mut self) -> String {
        let Some(current) = self.lines.get(self.line) else {
            return String::new();
        };
        let rest = current.tokens[self.col.min(current.tokens.len())..].join(" ");
        self.last_line = current.number;
        if self.line + 1 < self.lines.len() {
            self.line += 1;
            self.col = 0;
        } else {
            self.col = current.tokens.len();
        }
        rest
    }

    /// Source line of the most recently consumed token (0 before the first).
    pub fn line(&self) -> usize {
        self.last_line
    }
}

/// Rejoin operand fragments split around commas.
///
/// A lone `,` is folded into the token before it, then any token ending in
/// `,` absorbs the token after it.
pub fn combine_tokens<I: IntoIterator<Item = String>>(tokens: I) -> Vec<String> {
    let mut folded: Vec<String> = Vec::new();
    for tok in tokens {
        if tok == "," {
            if let Some(prev) = folded.last_mut() {
                prev.push(',');
                continue;
            }
        }
        folded.push(tok);
    }

    let mut merged = Vec::with_capacity(folded.len());
    let mut iter = folded.into_iter();
    while let Some(mut tok) = iter.next() {
        while tok.ends_with(',') {
            match iter.next() {
                Some(next) => tok.push_str(&next),
                None => break,
            }
        }
        merged.push(tok);
    }
    merged
}
