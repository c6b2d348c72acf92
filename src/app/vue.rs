// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique à droite (double-clic = recopier l’expression)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + “Enter” virtuel mobile selon navigateur)

use eframe::egui;

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_statut(ui);

                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);

                ui.add_space(8.0);

                self.ui_pave_numerique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_statut(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let resp = ui
                .add_sized([72.0, 30.0], egui::Button::new("DEG/RAD"))
                .on_hover_text("Bascule degrés / radians (trigonométrie)");
            if resp.clicked() {
                self.basculer_mode();
            }

            ui.separator();

            self.bouton_action(ui, "MC", "Mémoire = 0", Action::MemoireEffacer);
            self.bouton_action(ui, "MR", "Rappelle la mémoire", Action::MemoireRappeler);
            self.bouton_action(ui, "M+", "Ajoute l’entrée à la mémoire", Action::MemoireAjouter);
            self.bouton_action(
                ui,
                "M-",
                "Retranche l’entrée de la mémoire",
                Action::MemoireSoustraire,
            );

            ui.separator();

            ui.monospace(self.statut());
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2^-2, sin(pi/2), fact(5)/3, log(1000)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Saisie clavier directe : le texte n’est plus un résultat “frais”
        if resp.changed() {
            self.juste_evalue = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.evaluer();
        }

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }

        ui.add_space(6.0);

        // Contrat: C = tout (sauf historique/mémoire) ; CE = dernier nombre/mot ; DEL = dernier motif
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface l’entrée et l’erreur", Action::ClearAll);
            self.bouton_action(ui, "CE", "Efface le dernier nombre ou mot", Action::ClearEntry);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
            self.bouton_action(ui, "±", "Change le signe", Action::Signe);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.evaluer();
            }
        });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        const LIGNES: [[&str; 5]; 4] = [
            ["sin", "cos", "tan", "log", "ln"],
            ["asin", "acos", "atan", "sqrt", "cbrt"],
            ["sinh", "cosh", "tanh", "exp", "abs"],
            ["floor", "ceil", "round", "fact", "inv"],
        ];

        egui::Grid::new("fonctions_sci")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in LIGNES {
                    for nom in ligne {
                        self.bouton_insert(ui, nom, &format!("{nom}("), InsertKind::Func);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_sci")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "π", "pi", InsertKind::Texte);
                self.bouton_insert(ui, "e", "e", InsertKind::Texte);
                self.bouton_insert(ui, "(", "(", InsertKind::Texte);
                self.bouton_insert(ui, ")", ")", InsertKind::Texte);
                self.bouton_insert(ui, "x^y", "^", InsertKind::Texte);
                ui.end_row();

                self.bouton_insert(ui, "7", "7", InsertKind::Texte);
                self.bouton_insert(ui, "8", "8", InsertKind::Texte);
                self.bouton_insert(ui, "9", "9", InsertKind::Texte);
                self.bouton_insert(ui, "÷", "/", InsertKind::Texte);
                self.bouton_insert(ui, "%", "%", InsertKind::Texte);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Texte);
                self.bouton_insert(ui, "5", "5", InsertKind::Texte);
                self.bouton_insert(ui, "6", "6", InsertKind::Texte);
                self.bouton_insert(ui, "×", "*", InsertKind::Texte);
                self.bouton_insert(ui, ",", ",", InsertKind::Texte);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Texte);
                self.bouton_insert(ui, "2", "2", InsertKind::Texte);
                self.bouton_insert(ui, "3", "3", InsertKind::Texte);
                self.bouton_insert(ui, "−", "-", InsertKind::Texte);
                ui.label("");
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Texte);
                self.bouton_insert(ui, ".", ".", InsertKind::Texte);
                ui.label("");
                self.bouton_insert(ui, "+", "+", InsertKind::Texte);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    /// Panneau historique (appelé par app.rs dans un SidePanel).
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Historique");
            if ui.button("Effacer").clicked() {
                self.effacer_historique();
            }
        });
        ui.separator();

        let mut a_copier = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for (idx, ligne) in self.historique.iter().enumerate() {
                    let mut texte = egui::RichText::new(ligne).monospace();
                    if self.selection == Some(idx) {
                        texte = texte.strong();
                    }
                    let resp = ui
                        .add(egui::Label::new(texte).sense(egui::Sense::click()))
                        .on_hover_text("Double-clic : recopier l’expression");
                    if resp.double_clicked() {
                        a_copier = Some(idx);
                    }
                }
            });

        if let Some(idx) = a_copier {
            self.copier_historique(idx);
        }
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([48.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearAll => self.clear_all(),
                Action::ClearEntry => self.clear_entry(),
                Action::Backspace => self.backspace_entree(),
                Action::Signe => self.basculer_signe(),
                Action::MemoireEffacer => self.memoire_effacer(),
                Action::MemoireRappeler => self.memoire_rappeler(),
                Action::MemoireAjouter => self.memoire_ajouter(),
                Action::MemoireSoustraire => self.memoire_soustraire(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([52.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::Func => self.inserer_fonction(to_insert),
            InsertKind::Texte => self.ajouter(to_insert),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearAll,
    ClearEntry,
    Backspace,
    Signe,
    MemoireEffacer,
    MemoireRappeler,
    MemoireAjouter,
    MemoireSoustraire,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Texte,
    Func,
}
