// src/app/historique.rs
//
// Historique persistant
// ---------------------
// Format du fichier `calc.hist` :
//   ligne 1 : somme de contrôle (FNV-1a 64 bits, en décimal) de la suite
//   puis    : une ligne `nom=valeur` par variable (ordre des noms)
//   puis    : `;`
//   puis    : les expressions mémorisées (`mots... :réponse`)
//
// Au chargement : vérification de la somme, remise à zéro des variables et
// de l'historique, rejeu des affectations par le moteur, puis écho des
// expressions restaurées derrière `hist:~# `.

use std::fs;
use std::path::PathBuf;

use crate::noyau::Moteur;

const PREFIXE: &str = "hist:~# ";

pub struct Historique {
    chemin: PathBuf,
    lignes: Vec<String>,
}

impl Historique {
    pub fn nouveau() -> Historique {
        Historique::avec_chemin("calc.hist")
    }

    pub fn avec_chemin(chemin: impl Into<PathBuf>) -> Historique {
        Historique {
            chemin: chemin.into(),
            lignes: Vec::new(),
        }
    }

    /// Mémorise une évaluation réussie : les mots de l'entrée, puis
    /// `:réponse` si la réponse n'est pas vide (les affectations n'en ont pas).
    pub fn ajoute_expression(&mut self, mots: &[String], reponse: &str) {
        let mut ligne = String::new();
        for mot in mots {
            ligne.push_str(mot);
            ligne.push(' ');
        }
        if !reponse.is_empty() {
            ligne.push(':');
            ligne.push_str(reponse);
        }
        self.lignes.push(ligne);
    }

    pub fn ajoute_ligne(&mut self, ligne: &str) {
        self.lignes.push(ligne.to_string());
    }

    pub fn vide(&mut self) {
        self.lignes.clear();
    }

    /// Variables puis `;` puis expressions, une ligne chacune.
    fn charge_utile(&self, moteur: &Moteur) -> String {
        let mut texte = String::new();
        for (nom, valeur) in moteur.vars() {
            texte.push_str(nom);
            texte.push('=');
            texte.push_str(&valeur.vers_texte(false));
            texte.push('\n');
        }
        texte.push_str(";\n");
        for ligne in &self.lignes {
            texte.push_str(ligne);
            texte.push('\n');
        }
        texte
    }

    pub fn sauve(&self, moteur: &Moteur) {
        let texte = self.charge_utile(moteur);
        let contenu = format!("{}\n{texte}", somme_controle(&texte));
        if let Err(erreur) = fs::write(&self.chemin, contenu) {
            println!("{PREFIXE}{erreur}");
        }
    }

    pub fn charge(&mut self, moteur: &mut Moteur) {
        let contenu = match fs::read_to_string(&self.chemin) {
            Ok(contenu) => contenu,
            Err(_) => return,
        };

        let mut lignes = contenu.lines();
        let attendue: u64 = match lignes.next().and_then(|ligne| ligne.trim().parse().ok()) {
            Some(valeur) => valeur,
            None => {
                println!("{PREFIXE}The file was corrupted!!!");
                return;
            }
        };

        // reconstitue la charge utile jusqu'à la première ligne vide
        let mut texte = String::new();
        let mut conservees: Vec<&str> = Vec::new();
        for ligne in lignes {
            if ligne.is_empty() {
                break;
            }
            texte.push_str(ligne);
            texte.push('\n');
            conservees.push(ligne);
        }

        if somme_controle(&texte) != attendue {
            println!("{PREFIXE}The file was corrupted!!!");
            return;
        }

        self.vide();
        moteur.vider_variables();

        let mut curseur = conservees.iter();
        for ligne in curseur.by_ref() {
            if *ligne == ";" {
                break;
            }
            moteur.evaluer(ligne);
        }
        for ligne in curseur {
            self.ajoute_ligne(ligne);
            match ligne.split_once(':') {
                None => println!("{PREFIXE}{ligne}"),
                Some((expression, reponse)) => {
                    println!("{PREFIXE}{expression}");
                    println!("{PREFIXE}{reponse}");
                }
            }
        }
    }
}

/// FNV-1a 64 bits ; stable d'une exécution et d'une machine à l'autre.
fn somme_controle(texte: &str) -> u64 {
    let mut etat: u64 = 0xcbf29ce484222325;
    for octet in texte.bytes() {
        etat ^= u64::from(octet);
        etat = etat.wrapping_mul(0x100000001b3);
    }
    etat
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{somme_controle, Historique};
    use crate::app::decouper_mots;
    use crate::noyau::Moteur;

    fn chemin_temporaire(nom: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("calc_hist_{nom}_{}", std::process::id()))
    }

    #[test]
    fn somme_stable() {
        assert_eq!(somme_controle(""), 0xcbf29ce484222325);
        assert_eq!(somme_controle("a"), somme_controle("a"));
        assert_ne!(somme_controle("a"), somme_controle("b"));
    }

    #[test]
    fn sauvegarde_puis_rechargement() {
        let chemin = chemin_temporaire("cycle");

        let mut moteur = Moteur::nouveau();
        let mut historique = Historique::avec_chemin(&chemin);

        moteur.evaluer("x=23+34");
        moteur.evaluer("lent=10000000000000000000000 * 3");
        historique.ajoute_expression(&decouper_mots("x=23+34"), "");
        historique.ajoute_expression(&decouper_mots("2 + 6"), "8");
        historique.sauve(&moteur);

        // un moteur neuf rejoue le fichier
        let mut moteur2 = Moteur::nouveau();
        let mut historique2 = Historique::avec_chemin(&chemin);
        historique2.charge(&mut moteur2);

        let variables: Vec<(String, String)> = moteur2
            .vars()
            .map(|(nom, valeur)| (nom.clone(), valeur.vers_texte(false)))
            .collect();
        assert_eq!(
            variables,
            [
                ("lent".to_string(), "30000000000000000000000".to_string()),
                ("x".to_string(), "57".to_string()),
            ]
        );

        let (resultat, erreur) = moteur2.evaluer("x % 5");
        assert!(!erreur);
        assert_eq!(resultat, "2");

        let _ = fs::remove_file(&chemin);
    }

    #[test]
    fn fichier_corrompu_refuse() {
        let chemin = chemin_temporaire("corrompu");
        fs::write(&chemin, "12345\nx=57\n;\n2 + 6 :8\n").unwrap();

        let mut moteur = Moteur::nouveau();
        let mut historique = Historique::avec_chemin(&chemin);
        historique.charge(&mut moteur);

        // rien n'est rejoué sur une somme invalide
        assert_eq!(moteur.vars().count(), 0);

        let _ = fs::remove_file(&chemin);
    }
}
