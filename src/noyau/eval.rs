//! Noyau — évaluation (pipeline réel)
//!
//! texte -> tokenize -> to_postfix -> contrôle de profondeur -> pile f64 -> contrôle fini
//!
//! Le mode d’angle est un PARAMÈTRE de chaque appel (aucun état partagé) :
//! deux évaluations concurrentes ne peuvent pas se gêner.

use tracing::debug;

use super::erreurs::{CalcError, EvalError};
use super::fonctions::AngleMode;
use super::jetons::{format_tokens, tokenize};
use super::operateurs::Op;
use super::rpn::{format_postfix, to_postfix, Instr};

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression dans le mode d’angle donné.
pub fn eval_expression(expr_str: &str, mode: AngleMode) -> Result<f64, CalcError> {
    eval_detaille(expr_str, mode).map(|(v, _d)| v)
}

/// Comme `eval_expression`, plus la démarche (jetons + RPN) pour l’affichage.
pub fn eval_detaille(expr_str: &str, mode: AngleMode) -> Result<(f64, Demarche), CalcError> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let res = pipeline(s, mode);
    match &res {
        Ok((v, _)) => debug!(expression = s, %mode, valeur = v, "évaluation réussie"),
        Err(e) => debug!(expression = s, %mode, erreur = %e, "évaluation refusée"),
    }
    res
}

fn pipeline(s: &str, mode: AngleMode) -> Result<(f64, Demarche), CalcError> {
    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_postfix(&jetons)?;
    debug!(jetons = jetons.len(), instructions = rpn.len(), "RPN construite");

    // 3) Pile
    let v = evaluate(&rpn, mode)?;

    let d = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_postfix(&rpn),
    };
    Ok((v, d))
}

/// Simule la profondeur de pile AVANT tout calcul.
///
/// - opérateur sans assez d’opérandes : InsufficientOperands
/// - fonction sur pile vide : MissingArgument
/// - profondeur finale ≠ 1 : MalformedExpression
pub fn check_depth(rpn: &[Instr]) -> Result<(), EvalError> {
    let mut profondeur: usize = 0;

    for instr in rpn {
        match instr {
            Instr::Num(_) | Instr::Const(_) => profondeur += 1,
            Instr::Op(op) => {
                let arite = op.info().arite;
                if profondeur < arite {
                    return Err(EvalError::InsufficientOperands(op.symbol()));
                }
                profondeur = profondeur - arite + 1;
            }
            Instr::Fonction(f) => {
                if profondeur == 0 {
                    return Err(EvalError::MissingArgument(f.nom()));
                }
            }
        }
    }

    if profondeur != 1 {
        return Err(EvalError::MalformedExpression);
    }
    Ok(())
}

/// Évalue une suite postfixée.
pub fn evaluate(rpn: &[Instr], mode: AngleMode) -> Result<f64, EvalError> {
    check_depth(rpn)?;

    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for instr in rpn {
        match *instr {
            Instr::Num(v) => st.push(v),
            Instr::Const(c) => st.push(c.valeur()),

            Instr::Op(op) => {
                let v = applique_op(op, &mut st)?;
                st.push(v);
            }

            Instr::Fonction(f) => {
                let a = st.pop().ok_or(EvalError::MissingArgument(f.nom()))?;
                st.push(f.appliquer(a, mode)?);
            }
        }
    }

    if st.len() != 1 {
        return Err(EvalError::MalformedExpression);
    }
    let res = st.pop().ok_or(EvalError::MalformedExpression)?;
    if !res.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }
    Ok(res)
}

/// Applique `op` au sommet de pile (pour un binaire, a empilé avant b).
fn applique_op(op: Op, st: &mut Vec<f64>) -> Result<f64, EvalError> {
    let manque = || EvalError::InsufficientOperands(op.symbol());
    let b = st.pop().ok_or_else(manque)?;
    let mut gauche = || st.pop().ok_or_else(manque);

    let v = match op {
        Op::Neg => -b,
        Op::Add => gauche()? + b,
        Op::Sub => gauche()? - b,
        Op::Mul => gauche()? * b,
        Op::Div => {
            let a = gauche()?;
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
        // reste flottant : signe du dividende
        Op::Rem => {
            let a = gauche()?;
            if b == 0.0 {
                return Err(EvalError::ModuloByZero);
            }
            a % b
        }
        Op::Pow => gauche()?.powf(b),
    };
    Ok(v)
}
