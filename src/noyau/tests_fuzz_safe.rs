//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés : jamais de panique, tout résultat Ok est fini,
//!   même entrée => même sortie (valeur OU erreur classée)

use std::time::{Duration, Instant};

use super::erreurs::{CalcError, EvalError};
use super::{eval_expression, format_resultat, AngleMode};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS: [&str; 20] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "log", "ln", "sqrt",
    "cbrt", "abs", "exp", "floor", "ceil", "round", "fact", "inv",
];

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(20);
    match rng.pick(4) {
        0 => format!("{entier}.{}", rng.pick(100)),
        1 => format!(".{}", rng.pick(10)),
        _ => format!("{entier}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("{a}*{}", gen_expr(rng, depth - 1)),
        4 => format!("{a}/{}", gen_expr(rng, depth - 1)),
        5 => format!("{a}%{}", gen_expr(rng, depth - 1)),
        6 => format!("({a})^{}", gen_atom(rng)),
        7 => format!("-{a}"),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            if rng.coin() {
                format!("{}({a})", f.to_uppercase())
            } else {
                format!("{f}({a})")
            }
        }
    }
}

/// Soupe de caractères : syntaxe volontairement cassée.
fn gen_soupe(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '7', '.', '+', '-', '*', '/', '%', '^', '(', ')', ',', ' ', 's', 'i', 'n', 'p',
        'e', 'x', '$',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn mode_au_hasard(rng: &mut Rng) -> AngleMode {
    if rng.coin() {
        AngleMode::Degrees
    } else {
        AngleMode::Radians
    }
}

/* ------------------------ Helper somme balancée ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_resultats_finis() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = mode_au_hasard(&mut rng);

        let r1 = eval_expression(&expr, mode);
        let r2 = eval_expression(&expr, mode);
        match (&r1, &r2) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.to_bits(), b.to_bits(), "non déterministe: {expr:?}");
                assert!(a.is_finite(), "résultat non fini accepté: {expr:?}");
                seen_ok += 1;
            }
            (Err(a), Err(b)) => {
                assert_eq!(a, b, "erreur non déterministe: {expr:?}");
                // le générateur ne produit que des expressions bien formées
                assert!(
                    matches!(a, CalcError::Eval(_)),
                    "erreur de syntaxe inattendue: expr={expr:?} err={a}"
                );
                seen_err += 1;
            }
            _ => panic!("Ok/Err divergents pour {expr:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_soupe_de_caracteres_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..600 {
        budget(t0, max);

        let len = 1 + rng.pick(24) as usize;
        let expr = gen_soupe(&mut rng, len);

        // aucune panique ; si Ok, la valeur est finie
        if let Ok(v) = eval_expression(&expr, AngleMode::Radians) {
            assert!(v.is_finite(), "expr={expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_relecture_du_format() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let Ok(v) = eval_expression(&expr, AngleMode::Radians) else {
            continue;
        };

        let txt = format_resultat(v);
        let relu = eval_expression(&txt, AngleMode::Radians)
            .unwrap_or_else(|e| panic!("relecture impossible: {txt:?} ({expr:?}) err={e}"));

        let tol = 1e-12 * v.abs().max(1.0);
        assert!(
            (relu - v).abs() <= tol,
            "relecture: expr={expr:?} v={v} txt={txt:?} relu={relu}"
        );
    }
}

#[test]
fn fuzz_safe_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr, AngleMode::Radians).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    // parser et évaluateur itératifs : pas de récursion, donc pas de débordement
    let n = 5000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_expression(&expr, AngleMode::Radians), Ok(1.0));

    let negs = format!("{}7", "-".repeat(n));
    assert_eq!(eval_expression(&negs, AngleMode::Radians), Ok(7.0));

    let non_ferme = format!("{}1", "(".repeat(n));
    assert!(eval_expression(&non_ferme, AngleMode::Radians).is_err());
}

#[test]
fn fuzz_safe_division_par_zero_toujours_classee() {
    let mut rng = Rng::new(0xD1F_u64);
    for _ in 0..50 {
        let a = gen_expr(&mut rng, 2);
        let expr = format!("({a})/0");
        let r = eval_expression(&expr, AngleMode::Radians);
        // soit a échoue lui-même, soit c’est la division
        if let Err(CalcError::Eval(e)) = &r {
            assert!(
                *e == EvalError::DivisionByZero || eval_expression(&a, AngleMode::Radians).is_err(),
                "expr={expr:?} err={e}"
            );
        } else {
            panic!("attendu une erreur d’évaluation: {expr:?} => {r:?}");
        }
    }
}
