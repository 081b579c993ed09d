use std::fmt::{self, Display, Formatter};

use chrono::{FixedOffset, Offset, Utc};
use tracing::{debug, trace};

use crate::block::{Hardware, LeaseEnd, LeaseStatement, RawBlock};
use crate::datetime::DateTimeValue;
use crate::lexer::{tokenize, Token, TokenKind};

/// Configures how lease text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Offset added to every UTC timestamp to produce local time.
    pub utc_offset: FixedOffset,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
        }
    }
}

/// Extract every well-formed `lease <ipv4> { ... }` block, in document order.
///
/// This is a search, not a consuming parse: text between blocks and blocks
/// that never close are skipped. Statements the grammar does not recognize
/// are dropped from their block without rejecting it.
pub fn parse_blocks(document: &str, opts: &ParseOptions) -> Vec<RawBlock> {
    let tokens = tokenize(document);
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        if !tokens[pos].is_atom("lease") {
            pos += 1;
            continue;
        }

        let mut cursor = Cursor { tokens: &tokens, pos };
        match parse_block(&mut cursor, opts) {
            Ok(block) => {
                blocks.push(block);
                pos = cursor.pos;
            }
            Err(reason) => {
                debug!(line = tokens[pos].line, %reason, "skipping lease block");
                pos += 1;
            }
        }
    }

    blocks
}

/// Why a block was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Abandon {
    NotAnAddress,
    MissingBrace,
    NestedLease,
    Unterminated,
    EndOfInput,
}

impl Display for Abandon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Abandon::NotAnAddress => "lease keyword not followed by an IPv4 address",
            Abandon::MissingBrace => "lease address not followed by '{'",
            Abandon::NestedLease => "lease keyword inside an open block",
            Abandon::Unterminated => "unterminated quoted string",
            Abandon::EndOfInput => "end of input before closing '}'",
        };
        f.write_str(reason)
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn atom(&mut self) -> Option<&'a str> {
        match &self.peek()?.kind {
            TokenKind::Atom(atom) => {
                self.pos += 1;
                Some(atom)
            }
            _ => None,
        }
    }

    fn quoted(&mut self) -> Option<&'a str> {
        match &self.peek()?.kind {
            TokenKind::Quoted(text) => {
                self.pos += 1;
                Some(text)
            }
            _ => None,
        }
    }

    fn keyword(&mut self, word: &str) -> Option<()> {
        if self.peek()?.is_atom(word) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    fn punct(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek()?.kind == kind {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }
}

fn parse_block(cursor: &mut Cursor<'_>, opts: &ParseOptions) -> Result<RawBlock, Abandon> {
    cursor.keyword("lease").ok_or(Abandon::NotAnAddress)?;
    let address = cursor
        .atom()
        .filter(|atom| is_ipv4(atom))
        .ok_or(Abandon::NotAnAddress)?;
    cursor
        .punct(TokenKind::LBrace)
        .ok_or(Abandon::MissingBrace)?;

    let mut block = RawBlock::new(address);
    loop {
        let token = cursor.peek().ok_or(Abandon::EndOfInput)?;
        match &token.kind {
            TokenKind::RBrace => {
                cursor.pos += 1;
                return Ok(block);
            }
            TokenKind::Unterminated => return Err(Abandon::Unterminated),
            TokenKind::Atom(word) if word == "lease" => return Err(Abandon::NestedLease),
            _ => {}
        }

        let start = cursor.pos;
        match parse_statement(cursor, opts) {
            Some(statement) => block.apply(statement),
            None => {
                cursor.pos = start;
                skip_statement(cursor)?;
                debug!(
                    line = token.line,
                    address = %block.address,
                    "dropping unrecognized lease statement"
                );
            }
        }
    }
}

/// Consume one statement the grammar did not accept.
///
/// Stops after a `;` at the outer level or after a balanced `{ ... }` group.
/// A `}` at the outer level is left in place since it closes the lease.
fn skip_statement(cursor: &mut Cursor<'_>) -> Result<(), Abandon> {
    let mut depth = 0usize;
    loop {
        let token = cursor.peek().ok_or(Abandon::EndOfInput)?;
        match &token.kind {
            TokenKind::Unterminated => return Err(Abandon::Unterminated),
            TokenKind::Atom(word) if depth == 0 && word == "lease" => {
                return Err(Abandon::NestedLease)
            }
            TokenKind::RBrace if depth == 0 => return Ok(()),
            TokenKind::Semi if depth == 0 => {
                cursor.pos += 1;
                return Ok(());
            }
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth -= 1;
                if depth == 0 {
                    cursor.pos += 1;
                    return Ok(());
                }
            }
            _ => {}
        }
        cursor.pos += 1;
    }
}

fn parse_statement(cursor: &mut Cursor<'_>, opts: &ParseOptions) -> Option<LeaseStatement> {
    let statement = match cursor.atom()? {
        "starts" => LeaseStatement::Starts(date(cursor, opts)?),
        "ends" => {
            if cursor.keyword("never").is_some() {
                LeaseStatement::Ends(LeaseEnd::Never)
            } else {
                LeaseStatement::Ends(LeaseEnd::At(date(cursor, opts)?))
            }
        }
        "tstp" => LeaseStatement::Tstp(date(cursor, opts)?),
        "tsfp" => LeaseStatement::Tsfp(date(cursor, opts)?),
        "atsfp" => LeaseStatement::Atsfp(date(cursor, opts)?),
        "cltt" => LeaseStatement::Cltt(date(cursor, opts)?),
        "hardware" => {
            let hw_type = cursor.atom().filter(|atom| is_word(atom))?;
            let mac = cursor.atom().filter(|atom| is_mac(atom))?;
            LeaseStatement::Hardware(Hardware {
                hw_type: hw_type.to_string(),
                mac: mac.to_string(),
            })
        }
        "uid" => LeaseStatement::Uid(cursor.quoted()?.to_string()),
        "binding" => {
            cursor.keyword("state")?;
            LeaseStatement::BindingState(cursor.atom()?.parse().ok()?)
        }
        "next" => {
            cursor.keyword("binding")?;
            cursor.keyword("state")?;
            LeaseStatement::NextBindingState(cursor.atom()?.parse().ok()?)
        }
        "client-hostname" => LeaseStatement::ClientHostname(cursor.quoted()?.to_string()),
        _ => return None,
    };
    cursor.punct(TokenKind::Semi)?;
    Some(statement)
}

fn date(cursor: &mut Cursor<'_>, opts: &ParseOptions) -> Option<DateTimeValue> {
    let weekday = cursor.atom()?;
    let date = cursor.atom()?;
    let time = cursor.atom()?;
    let value = DateTimeValue::from_parts(weekday, date, time, opts.utc_offset)?;
    trace!(utc = %value.utc(), local = %value, "converted lease timestamp");
    Some(value)
}

/// Four dot-separated runs of one to three decimal digits.
fn is_ipv4(atom: &str) -> bool {
    let parts: Vec<&str> = atom.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| (1..=3).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit()))
}

/// Six `:`-joined pairs of hex digits.
fn is_mac(atom: &str) -> bool {
    let parts: Vec<&str> = atom.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn is_word(atom: &str) -> bool {
    !atom.is_empty() && atom.chars().all(|c| c.is_ascii_alphanumeric())
}
