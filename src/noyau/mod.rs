//! Noyau numérique (f64)
//!
//! Organisation interne :
//! - erreurs.rs    : taxonomie des échecs (lecture / RPN / évaluation / pipeline)
//! - jetons.rs     : tokenisation
//! - operateurs.rs : table précédence / associativité / arité
//! - fonctions.rs  : fonctions, constantes, mode d’angle
//! - rpn.rs        : shunting-yard -> suite postfixée
//! - eval.rs       : pile f64 + pipeline complet
//! - format.rs     : affichage d’un résultat

pub mod erreurs;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod operateurs;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{eval_detaille, eval_expression, Demarche};
pub use fonctions::AngleMode;
pub use format::format_resultat;
