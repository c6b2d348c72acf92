//! Fonctions nommées, constantes et mode d’angle.
//!
//! Les identifiants sont résolus UNE fois (dans rpn.rs) en étiquettes fermées :
//! plus aucune comparaison de chaînes pendant l’évaluation.
//!
//! Le mode d’angle ne touche que sin/cos/tan (entrée) et asin/acos/atan (sortie).

use std::f64::consts;
use std::fmt;

use num_traits::ToPrimitive;

use super::erreurs::EvalError;

/// Tolérance pour accepter un argument « entier » dans fact.
const EPS_ENTIER: f64 = 1e-9;

/// Au-delà, n! n’est plus fini en f64.
const FACT_MAX: u32 = 170;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn basculer(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    fn vers_rad(self, x: f64) -> f64 {
        match self {
            AngleMode::Radians => x,
            AngleMode::Degrees => x.to_radians(),
        }
    }

    fn depuis_rad(self, x: f64) -> f64 {
        match self {
            AngleMode::Radians => x,
            AngleMode::Degrees => x.to_degrees(),
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Radians => f.write_str("RAD"),
            AngleMode::Degrees => f.write_str("DEG"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Ln,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Floor,
    Ceil,
    Round,
    Fact,
    Inv,
}

/// Résultat de la résolution d’un identifiant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ident {
    Constante(Constante),
    Fonction(Fonction),
}

impl Ident {
    /// `name` est déjà en minuscules (jetons.rs). None = identifiant inconnu.
    pub fn resolve(name: &str) -> Option<Ident> {
        use Fonction::*;

        let f = match name {
            "pi" => return Some(Ident::Constante(Constante::Pi)),
            "e" => return Some(Ident::Constante(Constante::E)),

            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "log" => Log,
            "ln" => Ln,
            "sqrt" => Sqrt,
            "cbrt" => Cbrt,
            "abs" => Abs,
            "exp" => Exp,
            "floor" => Floor,
            "ceil" => Ceil,
            "round" => Round,
            "fact" => Fact,
            "inv" => Inv,
            _ => return None,
        };
        Some(Ident::Fonction(f))
    }
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        use Fonction::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Log => "log",
            Ln => "ln",
            Sqrt => "sqrt",
            Cbrt => "cbrt",
            Abs => "abs",
            Exp => "exp",
            Floor => "floor",
            Ceil => "ceil",
            Round => "round",
            Fact => "fact",
            Inv => "inv",
        }
    }

    /// Applique la fonction (unaire) à `x`.
    ///
    /// Les valeurs non finies (asin(2), exp(1000)…) ne sont PAS des erreurs ici :
    /// c’est le contrôle final de l’évaluateur qui les refuse.
    pub fn appliquer(self, x: f64, mode: AngleMode) -> Result<f64, EvalError> {
        use Fonction::*;

        let v = match self {
            Sin => mode.vers_rad(x).sin(),
            Cos => mode.vers_rad(x).cos(),
            Tan => mode.vers_rad(x).tan(),

            Asin => mode.depuis_rad(x.asin()),
            Acos => mode.depuis_rad(x.acos()),
            Atan => mode.depuis_rad(x.atan()),

            Sinh => x.sinh(),
            Cosh => x.cosh(),
            Tanh => x.tanh(),

            Log => {
                if x <= 0.0 {
                    return Err(EvalError::DomainError("log(x) indéfini pour x ≤ 0"));
                }
                x.log10()
            }
            Ln => {
                if x <= 0.0 {
                    return Err(EvalError::DomainError("ln(x) indéfini pour x ≤ 0"));
                }
                x.ln()
            }

            Sqrt => {
                if x < 0.0 {
                    return Err(EvalError::DomainError("sqrt(x) indéfini pour x < 0"));
                }
                x.sqrt()
            }
            Cbrt => x.cbrt(),

            Abs => x.abs(),
            Exp => x.exp(),

            Floor => x.floor(),
            Ceil => x.ceil(),
            Round => x.round_ties_even(),

            Fact => factorielle(x)?,
            Inv => {
                if x == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                1.0 / x
            }
        };
        Ok(v)
    }
}

/// n! pour n entier (à 1e-9 près), 0 ≤ n ≤ 170.
fn factorielle(x: f64) -> Result<f64, EvalError> {
    if x < 0.0 {
        return Err(EvalError::DomainError("factorielle indéfinie pour x < 0"));
    }
    let arrondi = x.round_ties_even();
    if x.is_nan() || (x - arrondi).abs() > EPS_ENTIER {
        return Err(EvalError::DomainError("factorielle : entiers seulement"));
    }
    if arrondi > f64::from(FACT_MAX) {
        return Err(EvalError::Overflow);
    }
    let n = arrondi
        .to_u32()
        .ok_or(EvalError::DomainError("factorielle : entiers seulement"))?;

    let mut res = 1.0_f64;
    for k in 2..=n {
        res *= f64::from(k);
    }
    Ok(res)
}
