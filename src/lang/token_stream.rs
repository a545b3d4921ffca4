use crate::lang::source_buffer::SourceLocation;
use crate::runtime::error::{self, ScriptError};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A number token can be either an integer or a floating point literal.
#[derive(Clone, Copy)]
pub enum NumberType {
    /// We're holding an integer value.
    Int(i64),

    /// We're holding a floating point value.
    Float(f64),
}

impl Eq for NumberType {}

impl PartialEq for NumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberType::Int(a), NumberType::Int(b)) => a == b,
            (NumberType::Float(a), NumberType::Float(b)) => a == b,
            (NumberType::Float(a), NumberType::Int(b)) => *a == (*b as f64),
            (NumberType::Int(a), NumberType::Float(b)) => (*a as f64) == *b,
        }
    }
}

impl Hash for NumberType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            NumberType::Int(num) => num.hash(state),
            NumberType::Float(num) => num.to_bits().hash(state),
        }
    }
}

impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{}", num),
            NumberType::Float(num) => write!(f, "{}", num),
        }
    }
}

/// A single unit pulled from the token stream.  Borth only ever needs three kinds: a
/// number, a string literal, or a bare word — everything else (definition words, control
/// words, vocabulary directives) is just a `Word` token that happens to resolve to an
/// immediate word.
#[derive(Clone, PartialEq)]
pub enum Token {
    Number(SourceLocation, NumberType),
    String(SourceLocation, String),
    Word(SourceLocation, String),
}

impl Token {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::Number(location, _) => location,
            Token::String(location, _) => location,
            Token::Word(location, _) => location,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_, _))
    }

    /// The text of a word or string token.  Numbers have no canonical text form here;
    /// callers that need one should use `Display`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Word(_, text) | Token::String(_, text) => Some(text),
            Token::Number(_, _) => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(_, num) => write!(f, "{}", num),
            Token::String(_, string) => write!(f, "{}", string),
            Token::Word(_, string) => write!(f, "{}", string),
        }
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(location, num) => write!(f, "{}: {}", location, num),
            Token::String(location, string) => write!(f, "{}: {:?}", location, string),
            Token::Word(location, string) => write!(f, "{}: {}", location, string),
        }
    }
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_number_like(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.starts_with("0x") || text.starts_with("0b") {
        return true;
    }

    let mut chars = text.chars();
    let first = chars.next().unwrap();

    (first.is_ascii_digit() || first == '-')
        && text
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '.' || c == '-' || c == 'e' || c == 'E' || c == '_')
}

fn to_numeric(text: &str) -> Option<NumberType> {
    if let Some(stripped) = text.strip_prefix("0x") {
        return i64::from_str_radix(&stripped.replace('_', ""), 16)
            .ok()
            .map(NumberType::Int);
    }

    if let Some(stripped) = text.strip_prefix("0b") {
        return i64::from_str_radix(&stripped.replace('_', ""), 2)
            .ok()
            .map(NumberType::Int);
    }

    let cleaned = text.replace('_', "");

    if cleaned.contains('.') {
        cleaned.parse().ok().map(NumberType::Float)
    } else {
        cleaned.parse().ok().map(NumberType::Int)
    }
}

/// A character buffer with a single cursor.  The stream is pull-based: the executor (or a
/// primitive that has seized control of parsing, e.g. the `"` string word) asks for one
/// token or one run of characters at a time. This is what lets `next` re-enter a live
/// stream mid-execution and lets compile-mode words like `:`/`;` consume tokens between
/// ordinary executor steps without the whole source needing to be tokenized up front.
pub struct TokenStream {
    chars: Vec<char>,
    cursor: usize,
    location: SourceLocation,
}

impl TokenStream {
    pub fn new(path: &str, source: &str) -> Self {
        TokenStream {
            chars: source.chars().collect(),
            cursor: 0,
            location: SourceLocation::new_from_path(path),
        }
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    pub fn next_char(&mut self) -> Option<char> {
        let next = self.chars.get(self.cursor).copied();

        if let Some(c) = next {
            self.cursor += 1;

            if c == '\n' {
                self.location.advance_line();
            } else {
                self.location.advance_column();
            }
        }

        next
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !is_whitespace(c) {
                break;
            }
            self.next_char();
        }
    }

    /// Consume characters while `predicate` holds, returning what was consumed.  Used both
    /// internally for word/number tokens and externally by primitives (e.g. `"`) that want
    /// to parse with their own delimiter rather than the default whitespace rule.
    pub fn parse_while<F>(&mut self, mut predicate: F) -> String
    where
        F: FnMut(char) -> bool,
    {
        let mut text = String::new();

        while let Some(c) = self.peek_char() {
            if !predicate(c) {
                break;
            }
            text.push(c);
            self.next_char();
        }

        text
    }

    /// Consume characters up to (and including) the next occurrence of `terminator`,
    /// returning the text before it. Errors if the stream runs out first. This is how the
    /// `"` word takes over delimiter selection from the default whitespace-delimited token
    /// reader.
    pub fn parse_until(&mut self, terminator: char) -> error::Result<String> {
        let start = self.location.clone();
        let mut text = String::new();

        loop {
            match self.next_char() {
                Some(c) if c == terminator => return Ok(text),
                Some('\\') => {
                    let escaped = self.next_char().ok_or_else(|| {
                        ScriptError::new(Some(start.clone()), "unexpected end of file in string literal".into(), None)
                    })?;
                    text.push(match escaped {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => other,
                    });
                }
                Some(c) => text.push(c),
                None => {
                    return Err(ScriptError::new(
                        Some(start),
                        "unexpected end of file in string literal".into(),
                        None,
                    ));
                }
            }
        }
    }

    /// Read the next whitespace-delimited token, or `None` at end of stream. String
    /// literals seize the `"` sentinel and parse with `parse_until` instead.
    pub fn next_token(&mut self) -> error::Result<Option<Token>> {
        self.skip_whitespace();

        let Some(next) = self.peek_char() else {
            return Ok(None);
        };

        if next == '"' {
            self.next_char();
            let location = self.location.clone();
            let text = self.parse_until('"')?;
            return Ok(Some(Token::String(location, text)));
        }

        let location = self.location.clone();
        let text = self.parse_while(|c| !is_whitespace(c));

        if text.is_empty() {
            return Ok(None);
        }

        if is_number_like(&text) {
            if let Some(number) = to_numeric(&text) {
                return Ok(Some(Token::Number(location, number)));
            }
        }

        Ok(Some(Token::Word(location, text)))
    }

    /// Read exactly one more whitespace-delimited word, regardless of whether it looks
    /// like a number. Used by definition words (`: name`) that need the raw next token's
    /// text as a name even if it happens to parse as a number.
    pub fn next_raw_word(&mut self) -> error::Result<Option<(SourceLocation, String)>> {
        self.skip_whitespace();

        if self.peek_char().is_none() {
            return Ok(None);
        }

        let location = self.location.clone();
        let text = self.parse_while(|c| !is_whitespace(c));

        Ok(Some((location, text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_words_numbers_and_strings() {
        let mut stream = TokenStream::new("<test>", "5 dup + \"hi there\"");

        let a = stream.next_token().unwrap().unwrap();
        assert!(matches!(a, Token::Number(_, NumberType::Int(5))));

        let b = stream.next_token().unwrap().unwrap();
        assert_eq!(b.text(), Some("dup"));

        let c = stream.next_token().unwrap().unwrap();
        assert_eq!(c.text(), Some("+"));

        let d = stream.next_token().unwrap().unwrap();
        assert_eq!(d.text(), Some("hi there"));

        assert!(stream.next_token().unwrap().is_none());
    }

    #[test]
    fn negative_numbers_parse_as_numbers() {
        let mut stream = TokenStream::new("<test>", "-10 3");
        let a = stream.next_token().unwrap().unwrap();
        assert!(matches!(a, Token::Number(_, NumberType::Int(-10))));
    }

    #[test]
    fn parse_while_lets_primitives_take_over_delimiting() {
        let mut stream = TokenStream::new("<test>", "abc) rest");
        let consumed = stream.parse_while(|c| c != ')');
        assert_eq!(consumed, "abc");
        assert_eq!(stream.next_char(), Some(')'));
    }
}
