// src/noyau/jetons.rs

use std::collections::BTreeMap;

use super::erreur::ErreurCalc;
use super::nombre::Nombre;

/// Classification d'un jeton lu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreJeton {
    Nombre,
    Constante,
    Operation,
    Variable,
    ParentheseOuvrante,
    ParentheseFermante,
}

#[derive(Clone, Debug)]
pub struct Jeton {
    pub texte: String,
    pub genre: GenreJeton,
}

impl Jeton {
    fn nouveau(texte: impl Into<String>, genre: GenreJeton) -> Jeton {
        Jeton {
            texte: texte.into(),
            genre,
        }
    }
}

/// Lecteur positionnel : découpe le texte en jetons depuis la position
/// courante. L'état de lecture vit le temps d'un seul appel d'évaluation.
pub struct LecteurJetons<'a> {
    symboles: Vec<char>,
    position: usize,
    /// Première position utile : un `-` lu ici ouvre un littéral signé.
    debut: usize,
    constantes: &'a BTreeMap<String, Nombre>,
}

/// Alphabet admis : chiffres, lettres ASCII, `+ - * / % ( )`.
/// Le point n'est admis qu'à l'intérieur d'un nombre.
fn symbole_autorise(symbole: char) -> bool {
    symbole.is_ascii_alphanumeric() || matches!(symbole, '+' | '-' | '*' | '/' | '%' | '(' | ')')
}

fn termine_un_nombre(symbole: char) -> bool {
    matches!(symbole, '+' | '-' | '*' | '/' | '%' | ')') || symbole.is_whitespace()
}

impl<'a> LecteurJetons<'a> {
    pub fn nouveau(texte: &str, constantes: &'a BTreeMap<String, Nombre>) -> LecteurJetons<'a> {
        let symboles: Vec<char> = texte.chars().collect();
        let mut position = 0;
        while position < symboles.len() && symboles[position].is_whitespace() {
            position += 1;
        }
        LecteurJetons {
            symboles,
            position,
            debut: position,
            constantes,
        }
    }

    fn saute_espaces(&mut self) {
        while self.position < self.symboles.len() && self.symboles[self.position].is_whitespace() {
            self.position += 1;
        }
    }

    /// Lit le jeton suivant ; `None` en fin d'entrée.
    pub fn lire(&mut self) -> Result<Option<Jeton>, ErreurCalc> {
        self.saute_espaces();
        if self.position >= self.symboles.len() {
            return Ok(None);
        }

        let courant = self.symboles[self.position];
        if !symbole_autorise(courant) {
            return Err(ErreurCalc::SymboleInvalide);
        }

        // `-` en tête d'expression : signe du littéral à venir
        let mut signe_initial = false;
        if courant == '-' && self.position == self.debut {
            signe_initial = true;
            self.position += 1;
            self.saute_espaces();
            if self.position >= self.symboles.len() {
                return Ok(None);
            }
        }

        match self.symboles[self.position] {
            operation @ ('+' | '-' | '*' | '/' | '%') => {
                if self.position == self.debut {
                    return Err(ErreurCalc::OperandeManquante);
                }
                self.position += 1;
                Ok(Some(Jeton::nouveau(operation, GenreJeton::Operation)))
            }
            '(' => {
                self.position += 1;
                Ok(Some(Jeton::nouveau("(", GenreJeton::ParentheseOuvrante)))
            }
            ')' => {
                self.position += 1;
                Ok(Some(Jeton::nouveau(")", GenreJeton::ParentheseFermante)))
            }
            '0'..='9' => self.lit_nombre(signe_initial).map(Some),
            _ => Ok(Some(self.lit_identifiant())),
        }
    }

    /// Numéral : chiffres, au plus un point ; un symbole hors alphabet de fin
    /// de nombre est une faute lexicale.
    fn lit_nombre(&mut self, signe_initial: bool) -> Result<Jeton, ErreurCalc> {
        let mut texte = String::new();
        if signe_initial {
            texte.push('-');
        }

        let mut points = 0;
        while self.position < self.symboles.len() {
            let symbole = self.symboles[self.position];
            if symbole == '.' {
                points += 1;
                if points > 1 {
                    return Err(ErreurCalc::TropDePoints);
                }
                texte.push(symbole);
                self.position += 1;
                continue;
            }
            if symbole.is_ascii_digit() {
                texte.push(symbole);
                self.position += 1;
                continue;
            }
            if termine_un_nombre(symbole) {
                break;
            }
            return Err(ErreurCalc::NombreInvalide);
        }

        Ok(Jeton::nouveau(texte, GenreJeton::Nombre))
    }

    /// Suite maximale de lettres/chiffres ; le mot est une constante s'il
    /// figure dans la table, sinon une variable.
    fn lit_identifiant(&mut self) -> Jeton {
        let mut texte = String::new();
        while self.position < self.symboles.len()
            && self.symboles[self.position].is_ascii_alphanumeric()
        {
            texte.push(self.symboles[self.position]);
            self.position += 1;
        }

        let genre = if self.constantes.contains_key(&texte) {
            GenreJeton::Constante
        } else {
            GenreJeton::Variable
        };
        Jeton::nouveau(texte, genre)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{GenreJeton, LecteurJetons};
    use crate::noyau::erreur::ErreurCalc;
    use crate::noyau::nombre::Nombre;

    fn constantes() -> BTreeMap<String, Nombre> {
        let mut table = BTreeMap::new();
        table.insert("pi".to_string(), Nombre::depuis_texte("3.14"));
        table
    }

    fn genres(texte: &str) -> Result<Vec<(String, GenreJeton)>, ErreurCalc> {
        let table = constantes();
        let mut lecteur = LecteurJetons::nouveau(texte, &table);
        let mut sortie = Vec::new();
        while let Some(jeton) = lecteur.lire()? {
            sortie.push((jeton.texte, jeton.genre));
        }
        Ok(sortie)
    }

    #[test]
    fn decoupage_simple() {
        let jetons = genres("2+pi*(x7 - 0.5)").unwrap();
        let attendu = [
            ("2", GenreJeton::Nombre),
            ("+", GenreJeton::Operation),
            ("pi", GenreJeton::Constante),
            ("*", GenreJeton::Operation),
            ("(", GenreJeton::ParentheseOuvrante),
            ("x7", GenreJeton::Variable),
            ("-", GenreJeton::Operation),
            ("0.5", GenreJeton::Nombre),
            (")", GenreJeton::ParentheseFermante),
        ];
        assert_eq!(jetons.len(), attendu.len());
        for ((texte, genre), (texte_attendu, genre_attendu)) in jetons.iter().zip(attendu) {
            assert_eq!(texte, texte_attendu);
            assert_eq!(*genre, genre_attendu);
        }
    }

    #[test]
    fn moins_de_tete_absorbe() {
        let jetons = genres("  - 12 + 3").unwrap();
        assert_eq!(jetons[0].0, "-12");
        assert_eq!(jetons[0].1, GenreJeton::Nombre);
        assert_eq!(jetons.len(), 3);
    }

    #[test]
    fn operateur_en_tete_refuse() {
        assert_eq!(genres("*5"), Err(ErreurCalc::OperandeManquante));
        assert_eq!(genres("+5"), Err(ErreurCalc::OperandeManquante));
    }

    #[test]
    fn fautes_lexicales() {
        assert_eq!(genres("2 ^ 3"), Err(ErreurCalc::SymboleInvalide));
        assert_eq!(genres("1.2.3"), Err(ErreurCalc::TropDePoints));
        assert_eq!(genres("12a"), Err(ErreurCalc::NombreInvalide));
        assert_eq!(genres("34=x"), Err(ErreurCalc::NombreInvalide));
    }

    #[test]
    fn nombre_termine_par_parenthese() {
        let jetons = genres("(5)").unwrap();
        assert_eq!(jetons[1].0, "5");
        assert_eq!(jetons.len(), 3);
    }
}
