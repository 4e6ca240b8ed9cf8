// src/app/boucle.rs
//
// Boucle interactive — terminal
// -----------------------------
// Objectifs :
// - invite `calc:~# `, édition de ligne via rustyline
// - commandes : load / save / cls / clv / clh / test / exit,
//   tout le reste part au moteur comme expression
// - les évaluations réussies alimentent l'historique courant
//
// Note :
// - `exit` est testé avant toute autre chose, comme un vrai mot de sortie
// - Ctrl-C / Ctrl-D valent `exit`

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::historique::Historique;
use crate::app::testeur::Testeur;
use crate::app::decouper_mots;
use crate::noyau::Moteur;

const INVITE: &str = "calc:~# ";

pub fn lancer() -> rustyline::Result<()> {
    let mut moteur = Moteur::nouveau();
    let mut historique = Historique::nouveau();
    let mut editeur = DefaultEditor::new()?;

    efface_ecran();
    affiche_bienvenue();

    loop {
        let ligne = match editeur.readline(INVITE) {
            Ok(ligne) => ligne,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(erreur) => return Err(erreur),
        };

        let commande = ligne.trim();
        if commande == "exit" {
            break;
        }
        if !commande.is_empty() {
            let _ = editeur.add_history_entry(commande);
        }

        traite_commande(commande, &mut moteur, &mut historique);
    }

    efface_ecran();
    Ok(())
}

fn traite_commande(commande: &str, moteur: &mut Moteur, historique: &mut Historique) {
    let mots = decouper_mots(commande);
    if mots.is_empty() {
        return;
    }

    match (mots[0].as_str(), mots.len()) {
        ("load", 1) => {
            // recharge l'historique depuis le fichier
            efface_ecran();
            affiche_bienvenue();
            historique.charge(moteur);
        }
        ("save", 1) => historique.sauve(moteur),
        ("cls", 1) => {
            efface_ecran();
            affiche_bienvenue();
        }
        ("clv", 1) => {
            moteur.vider_variables();
            historique.ajoute_ligne("clv");
        }
        ("clh", 1) => historique.vide(),
        ("test", 1) => Testeur::nouveau().lance(moteur),
        _ => {
            // évaluation
            let (resultat, erreur) = moteur.evaluer(commande);

            if !erreur {
                historique.ajoute_expression(&mots, &resultat);
            }
            if !resultat.is_empty() {
                println!("eval:~# {resultat}");
            }
        }
    }
}

/// Efface l'écran et remonte le curseur (séquences ANSI).
fn efface_ecran() {
    print!("\x1b[2J\x1b[H");
    let _ = io::stdout().flush();
}

fn affiche_bienvenue() {
    println!("\t\tBienvenue dans la calculatrice grands nombres !");
    println!("\tElle évalue des expressions arithmétiques de taille arbitraire.");
    println!("  Quelques commandes utiles :");
    println!("   load - recharger l'historique");
    println!("   save - sauvegarder l'historique");
    println!("   cls  - effacer l'écran");
    println!("   clv  - effacer toutes les variables");
    println!("   clh  - effacer l'historique courant");
    println!("   test - rejouer le fichier exemples.tst");
    println!("   exit - quitter");
    println!("  Toute autre phrase est traitée comme une expression !");
    println!();
}
