// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (suite d’instructions postfixées)
//
// Règles:
// - Num / constante (pi, e) : sortie directe
// - Fonction (sin, sqrt, ...) : empilée, sortie après sa parenthèse fermante
// - Identifiant inconnu : erreur ICI (pas à l’évaluation)
// - Moins unaire:
//    - '-' en tête, ou juste après un opérateur ou '(' => Op::Neg
//    - sinon moins binaire
//    - la virgule ne compte pas : "(1,-2)" soustrait 2 de 1
// - Dépilement: seuls les OPÉRATEURS sortent sur précédence/associativité ;
//   une fonction ou une '(' en sommet de pile bloque.
//
// NOTE:
// - La virgule est acceptée (séparateur d’arguments) mais toutes les fonctions
//   sont unaires : "sqrt(4, 9)" laisse deux valeurs => expression invalide à
//   l’évaluation.

use std::fmt;

use super::erreurs::ParseError;
use super::fonctions::{Constante, Fonction, Ident};
use super::jetons::Tok;
use super::operateurs::Op;

/// Instruction postfixée (ce que consomme l’évaluateur).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    Num(f64),
    Const(Constante),
    Op(Op),
    Fonction(Fonction),
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Num(v) => write!(f, "{v}"),
            Instr::Const(c) => f.write_str(c.nom()),
            Instr::Op(op) => write!(f, "{}", op.symbol()),
            Instr::Fonction(fonc) => f.write_str(fonc.nom()),
        }
    }
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Op(Op),
    Fonction(Fonction),
    LPar,
}

impl Pile {
    /// Ce qui part en sortie quand on dépile (jamais appelé sur '(').
    fn en_sortie(self) -> Option<Instr> {
        match self {
            Pile::Op(op) => Some(Instr::Op(op)),
            Pile::Fonction(f) => Some(Instr::Fonction(f)),
            Pile::LPar => None,
        }
    }
}

/// `prev` autorise-t-il un moins unaire ?
/// (`prev` ne voit jamais de virgule : voir `to_postfix`)
fn position_prefixe(prev: Option<&Tok>) -> bool {
    matches!(prev, None | Some(Tok::Op(_)) | Some(Tok::LPar))
}

/// Dépile vers `out` jusqu’à trouver '(' (laissée en pile).
/// Renvoie false si la pile s’est vidée sans '('.
fn depile_jusqu_a_lpar(ops: &mut Vec<Pile>, out: &mut Vec<Instr>) -> bool {
    while let Some(top) = ops.last().copied() {
        match top.en_sortie() {
            None => return true,
            Some(instr) => {
                out.push(instr);
                ops.pop();
            }
        }
    }
    false
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Op('/'), Num(2), RPar]
///   rpn:    [Const(Pi), Num(2), Op(Div), Fonction(Sin)]
pub fn to_postfix(tokens: &[Tok]) -> Result<Vec<Instr>, ParseError> {
    let mut out: Vec<Instr> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();
    let mut prev: Option<&Tok> = None;

    for tok in tokens {
        match tok {
            Tok::Num(v) => out.push(Instr::Num(*v)),

            Tok::Ident(name) => match Ident::resolve(name) {
                Some(Ident::Constante(c)) => out.push(Instr::Const(c)),
                Some(Ident::Fonction(f)) => ops.push(Pile::Fonction(f)),
                None => return Err(ParseError::UnknownIdentifier(name.clone())),
            },

            Tok::Comma => {
                if !depile_jusqu_a_lpar(&mut ops, &mut out) {
                    return Err(ParseError::MisplacedComma);
                }
            }

            Tok::Op(c) => {
                let mut op = Op::from_symbol(*c).ok_or(ParseError::UnknownOperator(*c))?;
                if op == Op::Sub && position_prefixe(prev) {
                    op = Op::Neg;
                }

                while let Some(Pile::Op(top)) = ops.last().copied() {
                    if !op.cede_a(top) {
                        break;
                    }
                    out.push(Instr::Op(top));
                    ops.pop();
                }
                ops.push(Pile::Op(op));
            }

            Tok::LPar => ops.push(Pile::LPar),

            Tok::RPar => {
                if !depile_jusqu_a_lpar(&mut ops, &mut out) {
                    return Err(ParseError::MismatchedParen);
                }
                ops.pop(); // '('

                // fonction collée à son groupe : appliquée au résultat du groupe
                if let Some(Pile::Fonction(f)) = ops.last().copied() {
                    out.push(Instr::Fonction(f));
                    ops.pop();
                }
            }
        }
        // la virgule est transparente pour le moins : "(1,-2)" -> 1 2 -
        if !matches!(tok, Tok::Comma) {
            prev = Some(tok);
        }
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        out.push(top.en_sortie().ok_or(ParseError::MismatchedParen)?);
    }

    Ok(out)
}

/// Format utilitaire (“démarche”) : RPN en texte.
pub fn format_postfix(rpn: &[Instr]) -> String {
    rpn.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
