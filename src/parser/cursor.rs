//! Scanning primitives shared by the formula and moiety grammars.
//!
//! A [`Cursor`] is a byte offset into an immutable string. It lives on the
//! stack of one parse call and is passed by `&mut` through the recursive
//! descent, so no parser object ever holds per-call state.

use super::token::Token;

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Starts scanning `text` at byte offset `pos`.
    pub(crate) fn at(text: &'a str, pos: usize) -> Self {
        debug_assert!(text.is_char_boundary(pos));
        Self { text, pos }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn peek_token(&self) -> Option<Token> {
        self.peek().and_then(Token::classify)
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Steps over one ASCII byte. Callers only bump after peeking ASCII.
    #[inline]
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    /// Steps over one whole character, whatever its encoded width.
    pub(crate) fn bump_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    pub(crate) fn skip_blank(&mut self) {
        let skipped = self
            .rest()
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            .count();
        self.pos += skipped;
    }

    /// Returns the text up to the next `delim` and moves past the delimiter.
    ///
    /// Leaves the cursor untouched and returns `None` if `delim` never occurs.
    pub(crate) fn take_until(&mut self, delim: u8) -> Option<&'a str> {
        let len = self.rest().bytes().position(|b| b == delim)?;
        let span = &self.text[self.pos..self.pos + len];
        self.pos += len + 1;
        Some(span)
    }

    /// Scans a leading decimal real, or yields `default` if none starts here.
    ///
    /// Blanks before the number are skipped. A number may only start with a
    /// digit, `.` or `e`; the longest prefix of the form
    /// `digits [. digits] [e|E [+|-] digits]` with at least one mantissa
    /// digit is consumed.
    pub(crate) fn scan_real(&mut self, default: f64) -> f64 {
        self.skip_blank();
        match self.peek() {
            Some(b) if b.is_ascii_digit() || b == b'.' || b == b'e' => {}
            _ => return default,
        }

        let len = real_prefix_len(self.rest().as_bytes());
        if len == 0 {
            return default;
        }

        match self.rest()[..len].parse::<f64>() {
            Ok(value) => {
                self.pos += len;
                value
            }
            Err(_) => default,
        }
    }
}

fn real_prefix_len(bytes: &[u8]) -> usize {
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = digits(0);
    let mut mantissa = end;
    if bytes.get(end) == Some(&b'.') {
        let fraction = digits(end + 1);
        end += 1 + fraction;
        mantissa += fraction;
    }
    if mantissa == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    end
}
