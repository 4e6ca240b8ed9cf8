// src/main.rs
//
// Calculatrice grands nombres — point d'entrée
// --------------------------------------------
// But:
// - Terminal seulement : la boucle interactive vit dans src/app/boucle.rs
// - Ici: point d'entrée seulement
//
// IMPORTANT (structure projet):
// - noyau/ : arithmétique exacte + évaluation d'expressions
// - app/   : boucle, historique persistant, testeur de fichiers

mod app;
mod noyau;

fn main() -> rustyline::Result<()> {
    app::lancer()
}
