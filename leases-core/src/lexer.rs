use std::iter::Peekable;
use std::str::CharIndices;

/// Kind of a lexical token in a lease database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare run of characters: keywords, addresses, dates, MACs.
    Atom(String),
    /// Double-quoted string with the quotes stripped. Escapes are kept as written.
    Quoted(String),
    LBrace,
    RBrace,
    Semi,
    /// A quoted string that ran to end of input.
    Unterminated,
}

/// A token and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// True when the token is the bare word `word`.
    pub fn is_atom(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Atom(atom) if atom == word)
    }
}

/// Split a lease document into tokens, dropping whitespace and `#` comments.
///
/// Tokenizing never fails; text the grammar cannot use is still emitted and
/// left for the parser to skip.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut line = 1;

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => skip_comment(&mut chars),
            '{' => {
                chars.next();
                tokens.push(Token::new(TokenKind::LBrace, line));
            }
            '}' => {
                chars.next();
                tokens.push(Token::new(TokenKind::RBrace, line));
            }
            ';' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Semi, line));
            }
            '"' => {
                chars.next();
                let start_line = line;
                let kind = read_quoted(input, start + 1, &mut chars, &mut line);
                tokens.push(Token::new(kind, start_line));
            }
            _ => {
                let end = read_atom(input, &mut chars);
                tokens.push(Token::new(
                    TokenKind::Atom(input[start..end].to_string()),
                    line,
                ));
            }
        }
    }

    tokens
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '{' | '}' | ';' | '"' | '#')
}

fn skip_comment(chars: &mut Peekable<CharIndices<'_>>) {
    while let Some(&(_, ch)) = chars.peek() {
        if ch == '\n' {
            break;
        }
        chars.next();
    }
}

fn read_atom(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> usize {
    while let Some(&(idx, ch)) = chars.peek() {
        if is_delimiter(ch) {
            return idx;
        }
        chars.next();
    }
    input.len()
}

fn read_quoted(
    input: &str,
    content_start: usize,
    chars: &mut Peekable<CharIndices<'_>>,
    line: &mut usize,
) -> TokenKind {
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return TokenKind::Quoted(input[content_start..idx].to_string()),
            '\\' => {
                // The escaped character belongs to the string, whatever it is.
                if let Some((_, '\n')) = chars.next() {
                    *line += 1;
                }
            }
            '\n' => *line += 1,
            _ => {}
        }
    }
    TokenKind::Unterminated
}
