//! The closed set of structural characters recognized by both grammars.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bracket {
    Round,
    Square,
    Curly,
}

impl Bracket {
    pub(crate) fn open(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    pub(crate) fn close(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChargeSign {
    Plus,
    Minus,
    /// `@`, an explicitly neutral species.
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Open(Bracket),
    Close(Bracket),
    /// `/` around an isotope label.
    Isotope,
    /// `|` around a valence.
    Valence,
    Charge(ChargeSign),
    /// `:` between sublattice sites.
    SiteSeparator,
}

impl Token {
    pub(crate) fn classify(byte: u8) -> Option<Token> {
        match byte {
            b'(' => Some(Token::Open(Bracket::Round)),
            b')' => Some(Token::Close(Bracket::Round)),
            b'[' => Some(Token::Open(Bracket::Square)),
            b']' => Some(Token::Close(Bracket::Square)),
            b'{' => Some(Token::Open(Bracket::Curly)),
            b'}' => Some(Token::Close(Bracket::Curly)),
            b'/' => Some(Token::Isotope),
            b'|' => Some(Token::Valence),
            b'+' => Some(Token::Charge(ChargeSign::Plus)),
            b'-' => Some(Token::Charge(ChargeSign::Minus)),
            b'@' => Some(Token::Charge(ChargeSign::Neutral)),
            b':' => Some(Token::SiteSeparator),
            _ => None,
        }
    }

    pub(crate) fn byte(self) -> u8 {
        match self {
            Token::Open(b) => b.open() as u8,
            Token::Close(b) => b.close() as u8,
            Token::Isotope => b'/',
            Token::Valence => b'|',
            Token::Charge(ChargeSign::Plus) => b'+',
            Token::Charge(ChargeSign::Minus) => b'-',
            Token::Charge(ChargeSign::Neutral) => b'@',
            Token::SiteSeparator => b':',
        }
    }
}
