// src/noyau/format.rs

/// Décimales affichées au maximum (arrondi au plus proche).
const DECIMALES_MAX: usize = 15;

/// Affichage d’un résultat :
/// - au plus 15 décimales, zéros finaux retirés (et le '.' s’il reste seul)
/// - jamais de notation exponentielle, pas de séparateur de milliers
/// - "-0" devient "0"
///
/// Le texte produit se relit avec `eval_expression` (même valeur à 1e-15 près).
pub fn format_resultat(x: f64) -> String {
    let mut s = format!("{:.*}", DECIMALES_MAX, x);

    if s.contains('.') {
        let garde = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(garde);
    }

    if s == "-0" {
        s = "0".to_string();
    }
    s
}
