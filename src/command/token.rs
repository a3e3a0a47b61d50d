//! Tokenizer for the note command language.
//!
//! An argument starting with [`TRIGGER`] is an operator such as `.a2` or
//! `.d1,3`; everything else is literal text. Adjacent literal arguments are
//! merged into one literal token.

/// First char of every operator token.
pub const TRIGGER: char = '.';

/// Literal text, remembering the argument boundaries it was merged from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    parts: Vec<String>,
}

impl Literal {
    pub fn new(part: impl Into<String>) -> Self {
        Self {
            parts: vec![part.into()],
        }
    }

    fn push(&mut self, part: String) {
        self.parts.push(part);
    }

    /// The merged text, parts joined with single spaces.
    pub fn text(&self) -> String {
        self.parts.join(" ")
    }

    /// Split into the first argument and the rest, for two-operand
    /// commands. `None` when the literal came from a single argument.
    pub fn split_pair(&self) -> Option<(&str, String)> {
        let (first, rest) = self.parts.split_first()?;
        if rest.is_empty() {
            return None;
        }
        Some((first.as_str(), rest.join(" ")))
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

/// One element of a tokenized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(Literal),
    /// `mnemonic` is `None` for a bare trigger.
    Operator {
        mnemonic: Option<char>,
        suffix: String,
    },
}

impl Token {
    /// Parse one operator argument (leading trigger included).
    pub fn operator(raw: &str) -> Self {
        let mut chars = raw.strip_prefix(TRIGGER).unwrap_or(raw).chars();
        let mnemonic = chars.next();
        Self::Operator {
            mnemonic,
            suffix: chars.as_str().to_string(),
        }
    }

    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Operator { .. } => None,
        }
    }
}

/// Whether `arg` is an operator.
pub fn is_operator(arg: &str) -> bool {
    arg.starts_with(TRIGGER)
}

/// Tokenize an argument list.
///
/// Empty arguments are skipped. Literal arguments are unescaped with
/// [`unescape_literal`] and merged with their literal neighbours.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(args.len());
    for arg in args.iter().map(AsRef::as_ref).filter(|arg| !arg.is_empty()) {
        if is_operator(arg) {
            tokens.push(Token::operator(arg));
            continue;
        }
        let text = unescape_literal(arg);
        match tokens.last_mut() {
            Some(Token::Literal(literal)) => literal.push(text),
            _ => tokens.push(Token::Literal(Literal::new(text))),
        }
    }
    tokens
}

/// Decode a literal argument.
///
/// `_` stands for a space, so one argument can carry several spaces.
/// A backslash escapes the next `.`, `_` or `\`; other backslashes are kept.
pub fn unescape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                Some(&next) if matches!(next, '.' | '_' | '\\') => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            },
            '_' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// One numeric parameter of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// The body did not parse; means "current position".
    Unbounded,
    Exact(usize),
}

/// One parameter of a relative operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    Unbounded,
    Forward(usize),
    Backward(usize),
}

/// Numeric suffix of an operator: `.i3` moves to 3, `.i+1` / `.i-2` move by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumParam {
    /// No suffix.
    Unset,
    Absolute(Vec<Amount>),
    Relative(Vec<Offset>),
}

impl NumParam {
    /// Parse an operator suffix such as `"3"`, `"+1"` or `"1,-2"`.
    ///
    /// Any signed parameter makes the whole list relative.
    pub fn parse(suffix: &str) -> Self {
        if suffix.is_empty() {
            return Self::Unset;
        }
        let params: Vec<(Option<bool>, Amount)> = suffix.split(',').map(parse_one).collect();
        if params.iter().all(|(sign, _)| sign.is_none()) {
            return Self::Absolute(params.into_iter().map(|(_, amount)| amount).collect());
        }
        Self::Relative(
            params
                .into_iter()
                .map(|(sign, amount)| match (sign, amount) {
                    (_, Amount::Unbounded) => Offset::Unbounded,
                    (Some(true), Amount::Exact(n)) => Offset::Backward(n),
                    (_, Amount::Exact(n)) => Offset::Forward(n),
                })
                .collect(),
        )
    }

    /// Target of the first parameter, starting from `current`.
    pub fn resolve(&self, current: usize) -> usize {
        self.resolve_all(current).first().copied().unwrap_or(current)
    }

    /// Target of every parameter, starting from `current`.
    pub fn resolve_all(&self, current: usize) -> Vec<usize> {
        match self {
            Self::Unset => vec![current],
            Self::Absolute(amounts) => amounts
                .iter()
                .map(|amount| match amount {
                    Amount::Unbounded => current,
                    Amount::Exact(n) => *n,
                })
                .collect(),
            Self::Relative(offsets) => offsets
                .iter()
                .map(|offset| match offset {
                    Offset::Unbounded => current,
                    Offset::Forward(n) => current.saturating_add(*n),
                    Offset::Backward(n) => current.saturating_sub(*n),
                })
                .collect(),
        }
    }

    /// Size of the first parameter regardless of sign, used as a repeat
    /// count. `None` when unset or unparsable.
    pub fn magnitude(&self) -> Option<usize> {
        match self {
            Self::Unset => None,
            Self::Absolute(amounts) => match amounts.first()? {
                Amount::Exact(n) => Some(*n),
                Amount::Unbounded => None,
            },
            Self::Relative(offsets) => match offsets.first()? {
                Offset::Forward(n) | Offset::Backward(n) => Some(*n),
                Offset::Unbounded => None,
            },
        }
    }
}

/// Returns (sign, amount) where sign is `Some(true)` for `-`, `Some(false)`
/// for `+` and `None` when unsigned.
fn parse_one(param: &str) -> (Option<bool>, Amount) {
    let (sign, body) = if let Some(body) = param.strip_prefix('+') {
        (Some(false), body)
    } else if let Some(body) = param.strip_prefix('-') {
        (Some(true), body)
    } else {
        (None, param)
    };
    let amount = body.parse::<usize>().map_or(Amount::Unbounded, Amount::Exact);
    (sign, amount)
}

/// What an operator consumes after itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    None,
    Text,
    /// Find and replace text, taken from the first argument of the
    /// following literal and the rest of it.
    Pair,
}

/// Every operator of the command language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    InsertChar,
    DeleteChar,
    MoveCaret,
    ToWord,
    ToLine,
    InsertWord,
    InsertLine,
    AppendWord,
    AppendLine,
    NewLineBelow,
    NewLineAbove,
    DeleteWord,
    DeleteLine,
    ReplaceNext,
    ReplaceAll,
    Undo,
    Redo,
    Clear,
    ClearAll,
    Copy,
    Cut,
}

impl Op {
    pub const ALL: [Self; 21] = [
        Self::InsertChar,
        Self::DeleteChar,
        Self::MoveCaret,
        Self::ToWord,
        Self::ToLine,
        Self::InsertWord,
        Self::InsertLine,
        Self::AppendWord,
        Self::AppendLine,
        Self::NewLineBelow,
        Self::NewLineAbove,
        Self::DeleteWord,
        Self::DeleteLine,
        Self::ReplaceNext,
        Self::ReplaceAll,
        Self::Undo,
        Self::Redo,
        Self::Clear,
        Self::ClearAll,
        Self::Copy,
        Self::Cut,
    ];

    pub const fn from_mnemonic(mnemonic: char) -> Option<Self> {
        Some(match mnemonic {
            'h' => Self::InsertChar,
            'H' => Self::DeleteChar,
            'm' => Self::MoveCaret,
            't' => Self::ToWord,
            'T' => Self::ToLine,
            'i' => Self::InsertWord,
            'I' => Self::InsertLine,
            'a' => Self::AppendWord,
            'A' => Self::AppendLine,
            'o' => Self::NewLineBelow,
            'O' => Self::NewLineAbove,
            'd' => Self::DeleteWord,
            'D' => Self::DeleteLine,
            'r' => Self::ReplaceNext,
            'R' => Self::ReplaceAll,
            'z' => Self::Undo,
            'Z' => Self::Redo,
            'c' => Self::Clear,
            'C' => Self::ClearAll,
            'x' => Self::Copy,
            'X' => Self::Cut,
            _ => return None,
        })
    }

    pub const fn mnemonic(self) -> char {
        match self {
            Self::InsertChar => 'h',
            Self::DeleteChar => 'H',
            Self::MoveCaret => 'm',
            Self::ToWord => 't',
            Self::ToLine => 'T',
            Self::InsertWord => 'i',
            Self::InsertLine => 'I',
            Self::AppendWord => 'a',
            Self::AppendLine => 'A',
            Self::NewLineBelow => 'o',
            Self::NewLineAbove => 'O',
            Self::DeleteWord => 'd',
            Self::DeleteLine => 'D',
            Self::ReplaceNext => 'r',
            Self::ReplaceAll => 'R',
            Self::Undo => 'z',
            Self::Redo => 'Z',
            Self::Clear => 'c',
            Self::ClearAll => 'C',
            Self::Copy => 'x',
            Self::Cut => 'X',
        }
    }

    pub const fn payload(self) -> Payload {
        match self {
            Self::InsertChar
            | Self::InsertWord
            | Self::InsertLine
            | Self::AppendWord
            | Self::AppendLine
            | Self::NewLineBelow
            | Self::NewLineAbove => Payload::Text,
            Self::ReplaceNext | Self::ReplaceAll => Payload::Pair,
            Self::DeleteChar
            | Self::MoveCaret
            | Self::ToWord
            | Self::ToLine
            | Self::DeleteWord
            | Self::DeleteLine
            | Self::Undo
            | Self::Redo
            | Self::Clear
            | Self::ClearAll
            | Self::Copy
            | Self::Cut => Payload::None,
        }
    }
}
