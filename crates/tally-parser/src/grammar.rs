//! Grammar table: the nonterminals and the leading symbols of every
//! alternative the analyser chooses between.
//!
//! ```text
//! StatementPart   ::= begin StatementList end
//! StatementList   ::= Statement { ; Statement }
//! Statement       ::= Assignment | If | While | Call | DoUntil | For
//! Assignment      ::= identifier := ( stringConstant | Expression )
//! If              ::= if Condition then StatementList [ else StatementList ] end if
//! While           ::= while Condition loop StatementList end loop
//! Call            ::= call identifier ( ArgumentList )
//! DoUntil         ::= do StatementList until Condition
//! For             ::= for ( Assignment ; Condition ; Assignment ) do StatementList end loop
//! ArgumentList    ::= identifier { , identifier }
//! Condition       ::= identifier RelOp ( identifier | numberConstant | stringConstant )
//! RelOp           ::= > | >= | = | != | < | <=
//! Expression      ::= Term { ( + | - ) Term }
//! Term            ::= Factor { ( * | / | % ) Factor }
//! Factor          ::= identifier | numberConstant | ( Expression )
//! ```

use std::fmt;
use tally_lexer::Symbol;

/// A named grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    StatementPart,
    StatementList,
    Statement,
    AssignmentStatement,
    IfStatement,
    WhileStatement,
    ProcedureStatement,
    UntilStatement,
    ForStatement,
    ArgumentList,
    Condition,
    ConditionalOperator,
    Expression,
    Term,
    Factor,
}

impl Nonterminal {
    pub const ALL: [Nonterminal; 15] = [
        Nonterminal::StatementPart,
        Nonterminal::StatementList,
        Nonterminal::Statement,
        Nonterminal::AssignmentStatement,
        Nonterminal::IfStatement,
        Nonterminal::WhileStatement,
        Nonterminal::ProcedureStatement,
        Nonterminal::UntilStatement,
        Nonterminal::ForStatement,
        Nonterminal::ArgumentList,
        Nonterminal::Condition,
        Nonterminal::ConditionalOperator,
        Nonterminal::Expression,
        Nonterminal::Term,
        Nonterminal::Factor,
    ];

    /// Name used in traces.
    pub fn name(self) -> &'static str {
        match self {
            Nonterminal::StatementPart => "StatementPart",
            Nonterminal::StatementList => "StatementList",
            Nonterminal::Statement => "Statement",
            Nonterminal::AssignmentStatement => "AssignmentStatement",
            Nonterminal::IfStatement => "IfStatement",
            Nonterminal::WhileStatement => "WhileStatement",
            Nonterminal::ProcedureStatement => "ProcedureStatement",
            Nonterminal::UntilStatement => "UntilStatement",
            Nonterminal::ForStatement => "ForStatement",
            Nonterminal::ArgumentList => "ArgumentList",
            Nonterminal::Condition => "Condition",
            Nonterminal::ConditionalOperator => "ConditionalOperator",
            Nonterminal::Expression => "Expression",
            Nonterminal::Term => "Term",
            Nonterminal::Factor => "Factor",
        }
    }
}

/// Displays as `<Name>`, the form used in diagnostics.
impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// Leading symbols of each alternative; one inner slice per alternative.
pub type Alternatives = &'static [&'static [Symbol]];

const FACTOR_FIRST: &[Symbol] = &[Symbol::Identifier, Symbol::NumberConstant, Symbol::LParen];

const STATEMENT: Alternatives = &[
    &[Symbol::Identifier],
    &[Symbol::If],
    &[Symbol::While],
    &[Symbol::Call],
    &[Symbol::Do],
    &[Symbol::For],
];

const CONDITIONAL_OPERATOR: Alternatives = &[
    &[Symbol::GreaterThan],
    &[Symbol::GreaterEqual],
    &[Symbol::Equal],
    &[Symbol::NotEqual],
    &[Symbol::LessThan],
    &[Symbol::LessEqual],
];

const FACTOR: Alternatives = &[
    &[Symbol::Identifier],
    &[Symbol::NumberConstant],
    &[Symbol::LParen],
];

/// The choice after `:=` in an assignment.
pub const ASSIGNMENT_VALUE: Alternatives = &[&[Symbol::StringConstant], FACTOR_FIRST];

/// The choice after the operator in a condition.
pub const CONDITION_OPERAND: Alternatives = &[
    &[Symbol::Identifier],
    &[Symbol::NumberConstant],
    &[Symbol::StringConstant],
];

/// Operators continuing an expression with another term.
pub const ADDING_OPERATORS: &[Symbol] = &[Symbol::Plus, Symbol::Minus];

/// Operators continuing a term with another factor.
pub const MULTIPLYING_OPERATORS: &[Symbol] = &[Symbol::Times, Symbol::Divide, Symbol::Modulus];

/// Leading symbols of each alternative of `nonterminal`.
pub fn alternatives(nonterminal: Nonterminal) -> Alternatives {
    match nonterminal {
        Nonterminal::StatementPart => &[&[Symbol::Begin]],
        Nonterminal::StatementList => &[&[
            Symbol::Identifier,
            Symbol::If,
            Symbol::While,
            Symbol::Call,
            Symbol::Do,
            Symbol::For,
        ]],
        Nonterminal::Statement => STATEMENT,
        Nonterminal::AssignmentStatement => &[&[Symbol::Identifier]],
        Nonterminal::IfStatement => &[&[Symbol::If]],
        Nonterminal::WhileStatement => &[&[Symbol::While]],
        Nonterminal::ProcedureStatement => &[&[Symbol::Call]],
        Nonterminal::UntilStatement => &[&[Symbol::Do]],
        Nonterminal::ForStatement => &[&[Symbol::For]],
        Nonterminal::ArgumentList => &[&[Symbol::Identifier]],
        Nonterminal::Condition => &[&[Symbol::Identifier]],
        Nonterminal::ConditionalOperator => CONDITIONAL_OPERATOR,
        Nonterminal::Expression | Nonterminal::Term => &[FACTOR_FIRST],
        Nonterminal::Factor => FACTOR,
    }
}

/// Every symbol that can start one of the given alternatives, in table order.
pub fn leading(alternatives: Alternatives) -> Vec<Symbol> {
    alternatives.iter().flat_map(|alt| alt.iter().copied()).collect()
}

/// FIRST set of a nonterminal.
pub fn first(nonterminal: Nonterminal) -> Vec<Symbol> {
    leading(alternatives(nonterminal))
}

/// True if `symbol` can start `nonterminal`.
pub fn starts(nonterminal: Nonterminal, symbol: Symbol) -> bool {
    alternatives(nonterminal).iter().any(|alt| alt.contains(&symbol))
}

/// Render an expected set as `a`, `a or b`, or `a, b, or c`.
pub fn describe_expected(symbols: &[Symbol]) -> String {
    match symbols {
        [] => String::new(),
        [only] => only.to_string(),
        [a, b] => format!("{} or {}", a, b),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(|s| s.name()).collect();
            format!("{}, or {}", init.join(", "), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Symbols appearing in more than one alternative
    fn overlaps(alternatives: Alternatives) -> Vec<Symbol> {
        let mut seen = Vec::new();
        let mut shared = Vec::new();
        for alt in alternatives {
            for symbol in alt.iter() {
                if seen.contains(symbol) {
                    shared.push(*symbol);
                }
            }
            seen.extend(alt.iter().copied());
        }
        shared
    }

    #[test]
    fn test_alternatives_are_pairwise_disjoint() {
        for nonterminal in Nonterminal::ALL {
            let shared = overlaps(alternatives(nonterminal));
            assert!(shared.is_empty(), "{} alternatives share {:?}", nonterminal, shared);
        }
    }

    #[test]
    fn test_inline_choices_are_pairwise_disjoint() {
        assert!(overlaps(ASSIGNMENT_VALUE).is_empty());
        assert!(overlaps(CONDITION_OPERAND).is_empty());
    }

    #[test]
    fn test_loop_continuations_do_not_start_their_body() {
        for symbol in ADDING_OPERATORS.iter().chain(MULTIPLYING_OPERATORS) {
            assert!(!starts(Nonterminal::Term, *symbol));
            assert!(!starts(Nonterminal::Factor, *symbol));
        }
        assert!(!starts(Nonterminal::Statement, Symbol::Semicolon));
        assert!(!starts(Nonterminal::Statement, Symbol::Else));
    }

    #[test]
    fn test_statement_list_starts_like_statement() {
        assert_eq!(first(Nonterminal::StatementList), first(Nonterminal::Statement));
    }

    #[test]
    fn test_every_nonterminal_has_a_start() {
        for nonterminal in Nonterminal::ALL {
            assert!(!first(nonterminal).is_empty(), "{} has no FIRST set", nonterminal);
        }
    }

    #[test]
    fn test_describe_expected() {
        assert_eq!(describe_expected(&[Symbol::If]), "if");
        assert_eq!(describe_expected(&[Symbol::If, Symbol::Do]), "if or do");
        assert_eq!(
            describe_expected(&first(Nonterminal::Statement)),
            "identifier, if, while, call, do, or for"
        );
        assert_eq!(
            describe_expected(&first(Nonterminal::Factor)),
            "identifier, numberConstant, or ("
        );
    }

    #[test]
    fn test_display_brackets_the_name() {
        assert_eq!(Nonterminal::IfStatement.to_string(), "<IfStatement>");
        assert_eq!(Nonterminal::IfStatement.name(), "IfStatement");
    }
}
