use typedjs_ast::Span;

/// Token kinds of TypedJS.
///
/// Only reserved words get their own kind. Contextual words such as `type`,
/// `as`, `of`, `async` or `readonly` lex as `Identifier` and are recognized by
/// the parser from their text, so they stay usable as ordinary names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Let,
    Const,
    Var,
    Function,
    Return,
    If,
    Else,
    For,
    While,
    Do,
    Break,
    Continue,
    Switch,
    Case,
    Default,
    Class,
    Extends,
    Implements,
    Interface,
    Enum,
    Import,
    Export,
    New,
    This,
    Super,
    Typeof,
    Instanceof,
    In,
    Void,
    Delete,
    Null,
    Undefined,
    True,
    False,
    Await,
    Yield,
    Try,
    Catch,
    Finally,
    Throw,
    Static,
    Public,
    Private,
    Protected,
    Debugger,

    // Literals
    NumberLiteral,
    BigIntLiteral,
    StringLiteral,
    TemplateLiteral,
    RegexLiteral,

    Identifier,

    // Operators
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Percent, // %
    StarStar, // **
    Eq, // =
    EqEq, // ==
    EqEqEq, // ===
    BangEq, // !=
    BangEqEq, // !==
    Lt, // <
    Gt, // >
    LtEq, // <=
    GtEq, // >=
    AmpAmp, // &&
    PipePipe, // ||
    Bang, // !
    Amp, // &
    Pipe, // |
    Caret, // ^
    Tilde, // ~
    LtLt, // <<
    GtGt, // >>
    GtGtGt, // >>>
    PlusEq, // +=
    MinusEq, // -=
    StarEq, // *=
    SlashEq, // /=
    PercentEq, // %=
    StarStarEq, // **=
    AmpAmpEq, // &&=
    PipePipeEq, // ||=
    QuestionQuestionEq, // ??=
    LtLtEq, // <<=
    GtGtEq, // >>=
    GtGtGtEq, // >>>=
    AmpEq, // &=
    PipeEq, // |=
    CaretEq, // ^=
    QuestionQuestion, // ??
    QuestionDot, // ?.
    PlusPlus, // ++
    MinusMinus, // --
    FatArrow, // =>
    DotDotDot, // ...

    // Delimiters
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LBracket, // [
    RBracket, // ]
    Semicolon, // ;
    Comma, // ,
    Dot, // .
    Colon, // :
    Question, // ?
    At, // @

    // Special
    Eof,
    Error,
}

const RESERVED_WORDS: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Let),
    ("const", TokenKind::Const),
    ("var", TokenKind::Var),
    ("function", TokenKind::Function),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("do", TokenKind::Do),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("class", TokenKind::Class),
    ("extends", TokenKind::Extends),
    ("implements", TokenKind::Implements),
    ("interface", TokenKind::Interface),
    ("enum", TokenKind::Enum),
    ("import", TokenKind::Import),
    ("export", TokenKind::Export),
    ("new", TokenKind::New),
    ("this", TokenKind::This),
    ("super", TokenKind::Super),
    ("typeof", TokenKind::Typeof),
    ("instanceof", TokenKind::Instanceof),
    ("in", TokenKind::In),
    ("void", TokenKind::Void),
    ("delete", TokenKind::Delete),
    ("null", TokenKind::Null),
    ("undefined", TokenKind::Undefined),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("await", TokenKind::Await),
    ("yield", TokenKind::Yield),
    ("try", TokenKind::Try),
    ("catch", TokenKind::Catch),
    ("finally", TokenKind::Finally),
    ("throw", TokenKind::Throw),
    ("static", TokenKind::Static),
    ("public", TokenKind::Public),
    ("private", TokenKind::Private),
    ("protected", TokenKind::Protected),
    ("debugger", TokenKind::Debugger),
];

impl TokenKind {
    /// Reserved word for `text`, if any
    pub fn keyword(text: &str) -> Option<TokenKind> {
        RESERVED_WORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, kind)| *kind)
    }

    /// Reserved words are still valid property names after `.` and in
    /// object literals
    pub fn is_keyword(&self) -> bool {
        RESERVED_WORDS.iter().any(|(_, kind)| kind == self)
    }

    /// Whether a `/` after this token is division rather than a regex start
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::NumberLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::StringLiteral
                | TokenKind::TemplateLiteral
                | TokenKind::RegexLiteral
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::Null
                | TokenKind::Undefined
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }
}

/// A token with its kind, span, and value.
///
/// `value` is the cooked text: string contents without quotes and with
/// escapes resolved, number text without `_` separators, bigint digits
/// without the `n` suffix, the raw body of a template literal, or the
/// message of an `Error` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span, value: String) -> Self {
        Self { kind, span, value }
    }
}
