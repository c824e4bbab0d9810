//! Operator tables for the Pratt loop

use typedjs_ast::{AssignmentOp, BinaryOp};
use typedjs_lexer::TokenKind;

/// Binding powers, loosest first. A token with power `NONE` does not
/// continue the expression to its left.
pub(crate) mod bp {
    pub const NONE: u8 = 0;
    pub const ASSIGN: u8 = 1;
    pub const CONDITIONAL: u8 = 2;
    pub const NULLISH: u8 = 3;
    pub const OR: u8 = 4;
    pub const AND: u8 = 5;
    pub const BIT_OR: u8 = 6;
    pub const BIT_XOR: u8 = 7;
    pub const BIT_AND: u8 = 8;
    pub const EQUALITY: u8 = 9;
    pub const RELATIONAL: u8 = 10;
    pub const SHIFT: u8 = 11;
    pub const ADDITIVE: u8 = 12;
    pub const MULTIPLICATIVE: u8 = 13;
    pub const EXPONENT: u8 = 14;
    pub const UNARY: u8 = 15;
    pub const POSTFIX: u8 = 16;
    pub const CALL: u8 = 17;
}

const BINARY: &[(TokenKind, BinaryOp, u8)] = &[
    (TokenKind::QuestionQuestion, BinaryOp::NullishCoalesce, bp::NULLISH),
    (TokenKind::PipePipe, BinaryOp::Or, bp::OR),
    (TokenKind::AmpAmp, BinaryOp::And, bp::AND),
    (TokenKind::Pipe, BinaryOp::BitOr, bp::BIT_OR),
    (TokenKind::Caret, BinaryOp::BitXor, bp::BIT_XOR),
    (TokenKind::Amp, BinaryOp::BitAnd, bp::BIT_AND),
    (TokenKind::EqEq, BinaryOp::Eq, bp::EQUALITY),
    (TokenKind::BangEq, BinaryOp::NotEq, bp::EQUALITY),
    (TokenKind::EqEqEq, BinaryOp::StrictEq, bp::EQUALITY),
    (TokenKind::BangEqEq, BinaryOp::StrictNotEq, bp::EQUALITY),
    (TokenKind::Lt, BinaryOp::Lt, bp::RELATIONAL),
    (TokenKind::LtEq, BinaryOp::LtEq, bp::RELATIONAL),
    (TokenKind::Gt, BinaryOp::Gt, bp::RELATIONAL),
    (TokenKind::GtEq, BinaryOp::GtEq, bp::RELATIONAL),
    (TokenKind::In, BinaryOp::In, bp::RELATIONAL),
    (TokenKind::Instanceof, BinaryOp::InstanceOf, bp::RELATIONAL),
    (TokenKind::LtLt, BinaryOp::LeftShift, bp::SHIFT),
    (TokenKind::GtGt, BinaryOp::RightShift, bp::SHIFT),
    (TokenKind::GtGtGt, BinaryOp::UnsignedRightShift, bp::SHIFT),
    (TokenKind::Plus, BinaryOp::Add, bp::ADDITIVE),
    (TokenKind::Minus, BinaryOp::Sub, bp::ADDITIVE),
    (TokenKind::Star, BinaryOp::Mul, bp::MULTIPLICATIVE),
    (TokenKind::Slash, BinaryOp::Div, bp::MULTIPLICATIVE),
    (TokenKind::Percent, BinaryOp::Mod, bp::MULTIPLICATIVE),
    (TokenKind::StarStar, BinaryOp::Pow, bp::EXPONENT),
];

/// `op=` tokens and the arithmetic or bitwise operator they apply
const COMPOUND: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::PlusEq, BinaryOp::Add),
    (TokenKind::MinusEq, BinaryOp::Sub),
    (TokenKind::StarEq, BinaryOp::Mul),
    (TokenKind::SlashEq, BinaryOp::Div),
    (TokenKind::PercentEq, BinaryOp::Mod),
    (TokenKind::StarStarEq, BinaryOp::Pow),
    (TokenKind::LtLtEq, BinaryOp::LeftShift),
    (TokenKind::GtGtEq, BinaryOp::RightShift),
    (TokenKind::GtGtGtEq, BinaryOp::UnsignedRightShift),
    (TokenKind::AmpEq, BinaryOp::BitAnd),
    (TokenKind::PipeEq, BinaryOp::BitOr),
    (TokenKind::CaretEq, BinaryOp::BitXor),
];

/// Binary operator spelled by `kind` and its binding power
pub(crate) fn binary_operator(kind: TokenKind) -> Option<(BinaryOp, u8)> {
    BINARY
        .iter()
        .find(|(token, _, _)| *token == kind)
        .map(|(_, op, power)| (*op, *power))
}

pub(crate) fn assignment_operator(kind: TokenKind) -> Option<AssignmentOp> {
    let op = match kind {
        TokenKind::Eq => AssignmentOp::Assign,
        TokenKind::AmpAmpEq => AssignmentOp::Logical(BinaryOp::And),
        TokenKind::PipePipeEq => AssignmentOp::Logical(BinaryOp::Or),
        TokenKind::QuestionQuestionEq => AssignmentOp::Logical(BinaryOp::NullishCoalesce),
        _ => {
            let (_, op) = COMPOUND.iter().find(|(token, _)| *token == kind)?;
            AssignmentOp::Compound(*op)
        }
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_powers_follow_javascript() {
        let power = |kind| binary_operator(kind).map(|(_, power)| power);
        assert!(power(TokenKind::QuestionQuestion) < power(TokenKind::PipePipe));
        assert!(power(TokenKind::PipePipe) < power(TokenKind::AmpAmp));
        assert!(power(TokenKind::EqEqEq) < power(TokenKind::Lt));
        assert!(power(TokenKind::Plus) < power(TokenKind::Star));
        assert!(power(TokenKind::Star) < power(TokenKind::StarStar));
        assert_eq!(power(TokenKind::Question), None);
    }

    #[test]
    fn test_assignment_operators() {
        assert_eq!(assignment_operator(TokenKind::Eq), Some(AssignmentOp::Assign));
        assert_eq!(
            assignment_operator(TokenKind::GtGtGtEq),
            Some(AssignmentOp::Compound(BinaryOp::UnsignedRightShift))
        );
        assert_eq!(
            assignment_operator(TokenKind::QuestionQuestionEq),
            Some(AssignmentOp::Logical(BinaryOp::NullishCoalesce))
        );
        assert_eq!(assignment_operator(TokenKind::EqEq), None);
    }
}
