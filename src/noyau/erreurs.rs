//! Taxonomie des échecs du noyau.
//!
//! Une erreur par étage (lecture, RPN, évaluation) + `CalcError` qui les réunit
//! pour l’appelant. Toutes sont terminales : l’évaluation est pure, réessayer
//! avec la même entrée ne change rien.

use thiserror::Error;

/// Échec de la tokenisation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    /// `position` = index (en caractères) dans le texte tokenisé.
    #[error("caractère inattendu '{0}' (position {1})")]
    UnexpectedCharacter(char, usize),

    #[error("nombre invalide : '{0}'")]
    InvalidNumber(String),
}

/// Échec du shunting-yard.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("virgule mal placée ou '(' manquante")]
    MisplacedComma,

    #[error("parenthèses non appariées")]
    MismatchedParen,

    #[error("opérateur inconnu : '{0}'")]
    UnknownOperator(char),

    #[error("identifiant inconnu : {0}")]
    UnknownIdentifier(String),
}

/// Échec de l’évaluation postfixée.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("opérandes insuffisants pour l’opérateur '{0}'")]
    InsufficientOperands(char),

    #[error("argument manquant pour la fonction {0}")]
    MissingArgument(&'static str),

    #[error("division par zéro")]
    DivisionByZero,

    #[error("modulo par zéro")]
    ModuloByZero,

    #[error("hors domaine : {0}")]
    DomainError(&'static str),

    #[error("dépassement de capacité")]
    Overflow,

    #[error("expression invalide")]
    MalformedExpression,

    #[error("résultat non fini")]
    NonFiniteResult,
}

/// Échec classé du pipeline complet (ce que reçoit l’application).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("entrée vide")]
    EmptyExpression,

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
