//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, erreur, historique, mémoire,
//! mode d’angle) et offrir les actions des touches sans logique d’affichage.
//!
//! Contrats :
//! - Le noyau n’est appelé que par `evaluer` et par la mémoire (M+ / M-).
//! - Le mode d’angle est passé par valeur à chaque évaluation (instantané).
//! - Historique borné, jamais persisté.

use tracing::{debug, info};

use crate::noyau::{eval_detaille, eval_expression, format_resultat, AngleMode, Demarche};

/// Garde-fou : on borne l’historique (les plus anciennes lignes partent).
pub const HISTORIQUE_MAX: usize = 200;

/// Séparateur d’une ligne d’historique : "expr = résultat".
const SEP_HISTORIQUE: &str = " = ";

/// Motifs retirés d’un coup par DEL (les plus longs d’abord : "asin(" avant "sin(").
const MOTIFS_DEL: [&str; 21] = [
    "floor(", "round(", "asin(", "acos(", "atan(", "sinh(", "cosh(", "tanh(", "sqrt(", "cbrt(",
    "ceil(", "fact(", "sin(", "cos(", "tan(", "log(", "abs(", "exp(", "inv(", "ln(", "pi",
];

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub erreur: String, // message d’erreur (si l’évaluation échoue)
    pub demarche: Demarche,

    // --- historique (mémoire vive seulement) ---
    pub historique: Vec<String>,
    pub selection: Option<usize>,

    // --- registre mémoire (MC / MR / M+ / M-) ---
    pub memoire: f64,

    // --- paramètres ---
    pub mode: AngleMode,

    // --- UX ---
    // true juste après "=" : un chiffre tapé démarre une nouvelle expression.
    pub juste_evalue: bool,
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            historique: Vec::new(),
            selection: None,
            memoire: 0.0,
            mode: AngleMode::default(),
            juste_evalue: false,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

/// Ce texte, tapé juste après un résultat, démarre-t-il une nouvelle expression ?
fn commence_nouvelle(s: &str) -> bool {
    matches!(s, "." | "pi" | "e" | "(") || (s.len() == 1 && s.chars().all(|c| c.is_ascii_digit()))
}

/// Nombre "simple" (ex: -12, 3.5, .5) : pas besoin du noyau pour le lire.
/// Pas de '+' en tête : la grammaire n’a pas de plus unaire.
fn nombre_simple(s: &str) -> Option<f64> {
    let corps = s.strip_prefix('-').unwrap_or(s);
    let ok = !corps.is_empty()
        && corps.chars().all(|c| c.is_ascii_digit() || c == '.')
        && corps.chars().filter(|&c| c == '.').count() <= 1
        && corps != ".";
    if ok {
        s.parse::<f64>().ok()
    } else {
        None
    }
}

impl AppCalc {
    /* ------------------------ Saisie ------------------------ */

    /// Ajoute un symbole (chiffre, opérateur, parenthèse, pi, e).
    pub fn ajouter(&mut self, s: &str) {
        if self.juste_evalue && commence_nouvelle(s) {
            self.entree.clear();
        }
        self.juste_evalue = false;
        self.erreur.clear();
        self.entree.push_str(s);
        self.focus_entree = true;
    }

    /// Insère un appel de fonction ("sin(" ...) : repart de zéro après un résultat.
    pub fn inserer_fonction(&mut self, s: &str) {
        if self.juste_evalue {
            self.entree.clear();
        }
        self.juste_evalue = false;
        self.erreur.clear();
        self.entree.push_str(s);
        self.focus_entree = true;
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    /// Juste après un résultat : tout effacer.
    pub fn backspace_entree(&mut self) {
        if self.juste_evalue {
            self.clear_all();
            return;
        }

        // Retire espaces finaux
        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);

        match MOTIFS_DEL.iter().find(|pat| self.entree.ends_with(*pat)) {
            Some(pat) => {
                let garde = self.entree.len() - pat.len();
                self.entree.truncate(garde);
            }
            None => {
                self.entree.pop();
            }
        }

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
        self.focus_entree = true;
    }

    /// C : tout effacer (entrée + erreur + démarche), historique et mémoire intacts.
    pub fn clear_all(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.juste_evalue = false;
        self.focus_entree = true;
    }

    /// CE : retire le dernier nombre / mot, sinon le dernier symbole.
    pub fn clear_entry(&mut self) {
        if self.juste_evalue {
            self.clear_all();
            return;
        }

        let base = self.entree.trim_end();
        let mot = |c: char| c.is_alphanumeric() || c == '.';

        let coupe = match base.chars().last() {
            None => 0,
            Some(c) if mot(c) => base.trim_end_matches(mot).len(),
            Some(c) => base.len() - c.len_utf8(),
        };

        let garde = base[..coupe].trim_end().len();
        self.entree.truncate(garde);
        self.focus_entree = true;
    }

    /// ± : change le signe d’un nombre simple, sinon "(expr)*(-1)".
    pub fn basculer_signe(&mut self) {
        let cur = self.entree.trim();
        if cur.is_empty() || cur == "0" {
            return;
        }

        if self.juste_evalue || nombre_simple(cur).is_some() {
            self.entree = match cur.strip_prefix('-') {
                Some(reste) => reste.to_string(),
                None => format!("-{cur}"),
            };
        } else {
            self.entree = format!("({cur})*(-1)");
        }
        self.focus_entree = true;
    }

    /* ------------------------ Évaluation ------------------------ */

    /// "=" : évalue l’entrée dans le mode courant.
    ///
    /// Succès : l’entrée devient le résultat, une ligne part dans l’historique.
    /// Échec : message d’erreur, l’entrée est conservée pour correction.
    pub fn evaluer(&mut self) {
        let expr = self.entree.trim().to_string();

        match eval_detaille(&expr, self.mode) {
            Ok((v, demarche)) => {
                let res = format_resultat(v);
                self.pousser_historique(format!("{expr}{SEP_HISTORIQUE}{res}"));
                self.entree = res;
                self.erreur.clear();
                self.demarche = demarche;
                self.juste_evalue = true;
            }
            Err(e) => {
                self.erreur = e.to_string();
                self.demarche = Demarche::default();
                self.juste_evalue = false;
            }
        }
        self.focus_entree = true;
    }

    pub fn basculer_mode(&mut self) {
        self.mode = self.mode.basculer();
        info!(mode = %self.mode, "mode d’angle");
        self.focus_entree = true;
    }

    /* ------------------------ Historique ------------------------ */

    fn pousser_historique(&mut self, ligne: String) {
        self.historique.push(ligne);
        if self.historique.len() > HISTORIQUE_MAX {
            let trop = self.historique.len() - HISTORIQUE_MAX;
            self.historique.drain(..trop);
            self.selection = None;
        }
    }

    /// Recopie l’EXPRESSION d’une ligne d’historique dans l’entrée.
    pub fn copier_historique(&mut self, idx: usize) {
        let Some(ligne) = self.historique.get(idx) else {
            return;
        };
        if let Some((expr, _res)) = ligne.split_once(SEP_HISTORIQUE) {
            if !expr.is_empty() {
                self.entree = expr.to_string();
                self.erreur.clear();
                self.juste_evalue = false;
            }
        }
        self.selection = Some(idx);
        self.focus_entree = true;
    }

    pub fn effacer_historique(&mut self) {
        info!(lignes = self.historique.len(), "historique effacé");
        self.historique.clear();
        self.selection = None;
    }

    /* ------------------------ Mémoire ------------------------ */

    /// Valeur de l’entrée : nombre simple, sinon évaluation ; tout échec vaut 0.
    fn valeur_courante_ou_zero(&self) -> f64 {
        let t = self.entree.trim();
        if let Some(v) = nombre_simple(t) {
            return v;
        }
        eval_expression(t, self.mode).unwrap_or_else(|e| {
            debug!(erreur = %e, "mémoire : entrée illisible, 0 retenu");
            0.0
        })
    }

    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
        self.focus_entree = true;
    }

    pub fn memoire_rappeler(&mut self) {
        self.entree = format_resultat(self.memoire);
        self.erreur.clear();
        self.juste_evalue = true;
        self.focus_entree = true;
    }

    pub fn memoire_ajouter(&mut self) {
        self.memoire += self.valeur_courante_ou_zero();
        debug!(memoire = self.memoire, "M+");
        self.focus_entree = true;
    }

    pub fn memoire_soustraire(&mut self) {
        self.memoire -= self.valeur_courante_ou_zero();
        debug!(memoire = self.memoire, "M-");
        self.focus_entree = true;
    }

    /// Ligne d’état : "RAD | M=12.5".
    pub fn statut(&self) -> String {
        format!("{} | M={}", self.mode, format_resultat(self.memoire))
    }
}
