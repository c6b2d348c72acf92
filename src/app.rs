// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// ------------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La gestion Enter est faite dans vue.rs (quand le champ a le focus).

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal (safe natif + web) :
        // ESC = tout effacer (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_all();
        }

        egui::SidePanel::right("historique")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                self.ui_historique(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
