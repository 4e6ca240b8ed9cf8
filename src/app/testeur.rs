// src/app/testeur.rs
//
// Testeur de non-régression piloté par fichier
// --------------------------------------------
// Le fichier `exemples.tst` alterne des paires de lignes non vides :
//   expression
//   résultat attendu
// Le résultat attendu est soit un seul mot (comparé au rendu du moteur),
// soit `var nom valeur` : l'expression est une affectation et `nom` doit
// ensuite s'évaluer en `valeur`.

use std::fs;
use std::path::PathBuf;

use crate::app::decouper_mots;
use crate::noyau::Moteur;

const PREFIXE: &str = "test:~# ";

pub struct Testeur {
    chemin: PathBuf,
}

impl Testeur {
    pub fn nouveau() -> Testeur {
        Testeur::avec_chemin("exemples.tst")
    }

    pub fn avec_chemin(chemin: impl Into<PathBuf>) -> Testeur {
        Testeur {
            chemin: chemin.into(),
        }
    }

    /// Paires (expression, attendu), ou `None` sur fichier illisible ou rangée
    /// malformée.
    fn lit_donnees(&self) -> Option<Vec<(String, String)>> {
        let contenu = match fs::read_to_string(&self.chemin) {
            Ok(contenu) => contenu,
            Err(_) => {
                println!("{PREFIXE}File can't be opened!");
                return None;
            }
        };

        let mut paires = Vec::new();
        let mut expression: Option<String> = None;

        for (rangee, ligne) in contenu.lines().enumerate() {
            if ligne.trim().is_empty() {
                continue;
            }
            match expression.take() {
                None => expression = Some(ligne.to_string()),
                Some(gauche) => {
                    let attendu = ligne.trim_start().to_string();
                    let mots = decouper_mots(&attendu);
                    if attendu.starts_with("var ") {
                        if mots.len() != 3 {
                            println!(
                                "{PREFIXE}Row {rangee}: expected variable result is incorrect!"
                            );
                            return None;
                        }
                    } else if mots.len() != 1 {
                        println!("{PREFIXE}Row {rangee}: expression is not a single number!");
                        return None;
                    }
                    paires.push((gauche, attendu));
                }
            }
        }

        Some(paires)
    }

    /// Rejoue les paires ; rend le nombre d'échecs.
    fn verifie(&self, paires: &[(String, String)], moteur: &mut Moteur) -> usize {
        let mut echecs = 0usize;

        for (expression, attendu) in paires {
            let (resultat, erreur) = moteur.evaluer(expression);

            let conforme = match attendu.strip_prefix("var ") {
                Some(reste) => {
                    let mots = decouper_mots(reste);
                    !erreur && {
                        let (valeur, erreur_lecture) = moteur.evaluer(&mots[0]);
                        !erreur_lecture && valeur == mots[1]
                    }
                }
                None => resultat == *attendu,
            };
            if conforme {
                continue;
            }

            println!("{PREFIXE}Answer doesn't match expected answer:");
            println!("\tExpr: {expression}");
            println!("\tExpected answ: {attendu}");
            println!("\tAnsw         : {resultat}");
            println!();
            echecs += 1;
        }

        echecs
    }

    pub fn lance(&self, moteur: &mut Moteur) {
        let Some(paires) = self.lit_donnees() else {
            println!("{PREFIXE}Test finished.");
            return;
        };

        let echecs = self.verifie(&paires, moteur);

        println!(
            "{PREFIXE}{} of {} are successful.",
            paires.len() - echecs,
            paires.len()
        );
        println!("{PREFIXE}Test finished.");

        moteur.vider_variables();
    }
}
