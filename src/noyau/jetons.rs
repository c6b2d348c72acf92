// src/noyau/jetons.rs

use super::erreurs::LexError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Symbole brut parmi + - * / % ^
    // NOTE: le moins unaire n’est PAS décidé ici (c’est le travail de rpn.rs).
    Op(char),

    // Fonctions + constantes, normalisées en minuscules.
    // La résolution (sin / pi / inconnu) se fait dans rpn.rs.
    Ident(String),

    LPar,
    RPar,
    Comma,
}

/// Symboles d’opérateurs reconnus par la lecture.
const SYMBOLES_OP: &str = "+-*/%^";

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 3.14, .5, 5.) : chiffres + au plus un '.'
/// - opérateurs + - * / % ^
/// - parenthèses ( ) et virgule
/// - identifiants [lettre][lettre|chiffre|_]* (normalisés en minuscules)
///
/// Un second '.' termine le nombre : "1.2.3" donne deux nombres accolés,
/// refusés plus tard par l’évaluation (pas ici).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffres + au plus un point
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point_vu = c == '.';
            i += 1;
            while i < chars.len() {
                let ch = chars[i];
                if ch.is_ascii_digit() {
                    i += 1;
                } else if ch == '.' && !point_vu {
                    point_vu = true;
                    i += 1;
                } else {
                    break;
                }
            }

            let txt: String = chars[start..i].iter().collect();
            if txt == "." {
                return Err(LexError::InvalidNumber(txt));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| LexError::InvalidNumber(txt.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        // Identifiants : lettre puis lettres/chiffres/_
        if c.is_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        match c {
            '(' => out.push(Tok::LPar),
            ')' => out.push(Tok::RPar),
            ',' => out.push(Tok::Comma),
            _ if SYMBOLES_OP.contains(c) => out.push(Tok::Op(c)),
            _ => return Err(LexError::UnexpectedCharacter(c, i)),
        }
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Op(c) => c.to_string(),
            Tok::Ident(name) => name.clone(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
