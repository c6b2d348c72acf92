//! Propriétés attendues du noyau (campagne) : précédence, trig, factorielle,
//! erreurs classées, relecture du format.
//!
//! Tout passe par l’API publique `eval_expression` (texte + mode d’angle).

use super::erreurs::{CalcError, EvalError, ParseError};
use super::{eval_expression, format_resultat, AngleMode};

fn eval_ok(expr: &str, mode: AngleMode) -> f64 {
    eval_expression(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_rad(expr: &str) -> f64 {
    eval_ok(expr, AngleMode::Radians)
}

fn eval_err(expr: &str) -> CalcError {
    match eval_expression(expr, AngleMode::Radians) {
        Ok(v) => panic!("expr={expr:?} : erreur attendue, obtenu {v}"),
        Err(e) => e,
    }
}

fn assert_proche(expr: &str, obtenu: f64, attendu: f64) {
    assert!(
        (obtenu - attendu).abs() < 1e-9,
        "expr={expr:?} attendu={attendu} obtenu={obtenu}"
    );
}

/* ------------------------ Littéraux ------------------------ */

#[test]
fn prop_litteraux_relus_a_l_identique() {
    for n in [0.0, 1.0, 42.0, 0.5, 3.25, 1234567.875, 0.001, 1e15] {
        let txt = format!("{n}");
        assert_eq!(eval_rad(&txt), n, "txt={txt:?}");
    }
    assert_eq!(eval_rad(".25"), 0.25);
    assert_eq!(eval_rad("7."), 7.0);
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn prop_precedence_et_groupes() {
    assert_eq!(eval_rad("2+3*4"), 14.0);
    assert_eq!(eval_rad("(2+3)*4"), 20.0);
    assert_eq!(eval_rad("2^3^2"), 512.0);
    assert_eq!(eval_rad("(2^3)^2"), 64.0);
    assert_eq!(eval_rad("-2^2"), -4.0);
    assert_eq!(eval_rad("2^-2"), 0.25);
    assert_eq!(eval_rad("2*3%4"), 2.0);
    assert_eq!(eval_rad("100/10/5"), 2.0);
}

#[test]
fn prop_espaces_et_majuscules() {
    assert_eq!(eval_rad("  2 +\t3 "), 5.0);
    assert_eq!(
        eval_ok("SIN(90)", AngleMode::Degrees),
        eval_ok("sin(90)", AngleMode::Degrees)
    );
    assert_eq!(eval_rad("PI"), eval_rad("pi"));
}

/* ------------------------ Trig + mode d’angle ------------------------ */

#[test]
fn prop_trig_selon_mode() {
    let v = eval_ok("sin(90)", AngleMode::Degrees);
    assert_proche("sin(90) DEG", v, 1.0);

    let v = eval_ok("sin(pi/2)", AngleMode::Radians);
    assert_proche("sin(pi/2) RAD", v, 1.0);

    let v = eval_ok("cos(60)", AngleMode::Degrees);
    assert_proche("cos(60) DEG", v, 0.5);

    let v = eval_ok("atan(1)", AngleMode::Radians);
    assert_proche("atan(1) RAD", v, std::f64::consts::FRAC_PI_4);

    // même texte, modes différents => valeurs différentes
    assert_ne!(
        eval_ok("sin(30)", AngleMode::Degrees),
        eval_ok("sin(30)", AngleMode::Radians)
    );
}

#[test]
fn prop_identite_pythagore() {
    for a in ["0.3", "1", "2.5", "-4"] {
        let expr = format!("sin({a})^2+cos({a})^2");
        assert_proche(&expr, eval_rad(&expr), 1.0);
    }
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn prop_factorielle() {
    assert_eq!(eval_rad("fact(5)"), 120.0);
    assert_eq!(eval_rad("fact(0)"), 1.0);
    assert_eq!(eval_rad("fact(10)/fact(9)"), 10.0);
    assert!(matches!(
        eval_err("fact(-1)"),
        CalcError::Eval(EvalError::DomainError(_))
    ));
    assert!(matches!(
        eval_err("fact(2.5)"),
        CalcError::Eval(EvalError::DomainError(_))
    ));
    assert_eq!(eval_err("fact(171)"), CalcError::Eval(EvalError::Overflow));
}

/* ------------------------ Erreurs classées ------------------------ */

#[test]
fn prop_erreurs_de_domaine() {
    assert_eq!(eval_err("1/0"), CalcError::Eval(EvalError::DivisionByZero));
    assert!(matches!(
        eval_err("log(0)"),
        CalcError::Eval(EvalError::DomainError(_))
    ));
    assert!(matches!(
        eval_err("sqrt(-1)"),
        CalcError::Eval(EvalError::DomainError(_))
    ));
    assert!(matches!(
        eval_err("ln(-2)"),
        CalcError::Eval(EvalError::DomainError(_))
    ));
}

#[test]
fn prop_parentheses_et_vide() {
    assert_eq!(eval_err("(2+3"), CalcError::Parse(ParseError::MismatchedParen));
    assert_eq!(eval_err("2+3)"), CalcError::Parse(ParseError::MismatchedParen));
    assert_eq!(eval_err(""), CalcError::EmptyExpression);
}

#[test]
fn prop_aucune_erreur_ne_fuit_un_resultat_partiel() {
    // le contrôle de profondeur refuse avant tout calcul
    assert_eq!(
        eval_err("1/0 2"),
        CalcError::Eval(EvalError::MalformedExpression)
    );
    assert_eq!(
        eval_err("sqrt(-1) 2"),
        CalcError::Eval(EvalError::MalformedExpression)
    );
}

/* ------------------------ Relecture du format ------------------------ */

#[test]
fn prop_format_puis_relecture() {
    for expr in [
        "1/3",
        "2/3",
        "-7/9",
        "pi",
        "e^10",
        "sqrt(2)",
        "fact(20)",
        "10^-7",
        "123456.789*1000",
    ] {
        let v = eval_rad(expr);
        let txt = format_resultat(v);
        let relu = eval_rad(&txt);
        let tol = 1e-12 * v.abs().max(1.0);
        assert!(
            (relu - v).abs() <= tol,
            "expr={expr:?} v={v} txt={txt:?} relu={relu}"
        );
    }
}
