// src/noyau/rpn.rs
//
// Shunting-yard : suite de jetons -> file postfixe (RPN).
//
// Règles :
// - priorités : * / % = 2, + - = 1, associativité gauche
// - premier jeton : nombre, constante, variable ou '(' seulement
// - deux opérateurs consécutifs admis une seule fois, si le second est '-' :
//   il devient le signe du numéral qui suit (l'opérateur en attente est
//   absorbé par préfixage de '-')
// - un '-' juste après '(' est aussi candidat signe
// - trois opérateurs consécutifs : faute de grammaire

use std::collections::BTreeMap;

use super::erreur::ErreurCalc;
use super::jetons::{GenreJeton, Jeton, LecteurJetons};
use super::nombre::Nombre;

fn priorite(operation: &str) -> i32 {
    match operation {
        "*" | "/" | "%" => 2,
        "+" | "-" => 1,
        _ => 0,
    }
}

/// Convertit une expression en file postfixe.
///
/// La table des constantes ne sert qu'à classer les identifiants.
pub fn vers_rpn(
    texte: &str,
    constantes: &BTreeMap<String, Nombre>,
) -> Result<Vec<Jeton>, ErreurCalc> {
    let mut lecteur = LecteurJetons::nouveau(texte, constantes);

    let mut sortie: Vec<Jeton> = Vec::new();
    let mut pile: Vec<Jeton> = Vec::new();

    // opérateurs consécutifs en attente : 1 = opérateur empilé,
    // 2 = signe '-' en suspens pour le numéral à venir
    let mut compteur = 0usize;
    let mut dernier_operande = false;
    let mut premier = true;
    let mut apres_ouvrante = false;

    while let Some(jeton) = lecteur.lire()? {
        if premier
            && !matches!(
                jeton.genre,
                GenreJeton::ParentheseOuvrante
                    | GenreJeton::Variable
                    | GenreJeton::Constante
                    | GenreJeton::Nombre
            )
        {
            return Err(ErreurCalc::DebutIncorrect);
        }
        premier = false;

        if dernier_operande
            && !matches!(
                jeton.genre,
                GenreJeton::ParentheseFermante | GenreJeton::Operation
            )
        {
            return Err(ErreurCalc::OperationManquante);
        }

        let ouvrante_precede = apres_ouvrante;
        apres_ouvrante = false;

        match jeton.genre {
            GenreJeton::Variable | GenreJeton::Constante => {
                if compteur == 2 {
                    return Err(ErreurCalc::ExpressionIncorrecte);
                }
                sortie.push(jeton);
                compteur = 0;
                dernier_operande = true;
            }

            GenreJeton::Nombre => {
                let mut jeton = jeton;
                if compteur == 2 {
                    jeton.texte.insert(0, '-');
                }
                sortie.push(jeton);
                compteur = 0;
                dernier_operande = true;
            }

            GenreJeton::ParentheseOuvrante => {
                if compteur == 2 {
                    return Err(ErreurCalc::ExpressionIncorrecte);
                }
                pile.push(jeton);
                apres_ouvrante = true;
            }

            GenreJeton::Operation => {
                if compteur >= 2 {
                    return Err(ErreurCalc::ExpressionIncorrecte);
                }
                if compteur == 1 || ouvrante_precede {
                    // seul un signe peut suivre un opérateur ou '('
                    if jeton.texte != "-" {
                        return Err(ErreurCalc::ExpressionIncorrecte);
                    }
                    compteur = 2;
                } else {
                    while let Some(haut) = pile.last() {
                        if haut.genre != GenreJeton::Operation
                            || priorite(&haut.texte) < priorite(&jeton.texte)
                        {
                            break;
                        }
                        sortie.push(pile.pop().unwrap());
                    }
                    pile.push(jeton);
                    compteur = 1;
                }
                dernier_operande = false;
            }

            GenreJeton::ParentheseFermante => {
                if compteur != 0 {
                    return Err(ErreurCalc::ExpressionIncorrecte);
                }
                loop {
                    match pile.pop() {
                        None => return Err(ErreurCalc::ParentheseOuvranteManquante),
                        Some(haut) if haut.genre == GenreJeton::ParentheseOuvrante => break,
                        Some(haut) => sortie.push(haut),
                    }
                }
                dernier_operande = true;
            }
        }
    }

    if compteur != 0 {
        return Err(ErreurCalc::ExpressionIncorrecte);
    }
    while let Some(haut) = pile.pop() {
        if haut.genre == GenreJeton::ParentheseOuvrante {
            return Err(ErreurCalc::ParentheseFermanteManquante);
        }
        sortie.push(haut);
    }

    Ok(sortie)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::vers_rpn;
    use crate::noyau::erreur::ErreurCalc;
    use crate::noyau::nombre::Nombre;

    fn constantes() -> BTreeMap<String, Nombre> {
        let mut table = BTreeMap::new();
        table.insert("pi".to_string(), Nombre::depuis_texte("3.14"));
        table
    }

    fn rpn(texte: &str) -> Result<String, ErreurCalc> {
        let table = constantes();
        let jetons = vers_rpn(texte, &table)?;
        Ok(jetons
            .iter()
            .map(|jeton| jeton.texte.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    #[test]
    fn priorites_et_parentheses() {
        assert_eq!(rpn("2+6").unwrap(), "2 6 +");
        assert_eq!(rpn("3+4*2/(1-5)").unwrap(), "3 4 2 * 1 5 - / +");
        assert_eq!(rpn("2+5*7-3*(89+0.5)").unwrap(), "2 5 7 * + 3 89 0.5 + * -");
        assert_eq!(rpn("2*pi").unwrap(), "2 pi *");
    }

    #[test]
    fn moins_unaire() {
        // après un opérateur
        assert_eq!(rpn("10 - - 2").unwrap(), "10 -2 -");
        assert_eq!(rpn("3*(-5)").unwrap(), "3 -5 *");
        // juste après une ouvrante
        assert_eq!(rpn("(-5)").unwrap(), "-5");
        // en tête (absorbé par le lecteur)
        assert_eq!(rpn("-5 + 2").unwrap(), "-5 2 +");
    }

    #[test]
    fn fautes_de_grammaire() {
        assert_eq!(rpn("1 - - - 2"), Err(ErreurCalc::ExpressionIncorrecte));
        assert_eq!(rpn("1 + * 2"), Err(ErreurCalc::ExpressionIncorrecte));
        assert_eq!(rpn("(+5)"), Err(ErreurCalc::ExpressionIncorrecte));
        assert_eq!(rpn("2 2"), Err(ErreurCalc::OperationManquante));
        assert_eq!(rpn("(2)(3)"), Err(ErreurCalc::OperationManquante));
        assert_eq!(rpn("1 +"), Err(ErreurCalc::ExpressionIncorrecte));
    }

    #[test]
    fn parentheses_depareillees() {
        assert_eq!(
            rpn("2 + 5 * 7 - 3 * (89 + 0.5"),
            Err(ErreurCalc::ParentheseFermanteManquante)
        );
        assert_eq!(
            rpn("2 + 5 * 7 - 3 * 89 + 0.5)"),
            Err(ErreurCalc::ParentheseOuvranteManquante)
        );
    }

    #[test]
    fn debut_incorrect() {
        assert_eq!(rpn(")2+3"), Err(ErreurCalc::DebutIncorrect));
        assert_eq!(rpn("- - 5"), Err(ErreurCalc::DebutIncorrect));
    }

    #[test]
    fn entree_vide() {
        assert!(rpn("").unwrap().is_empty());
        assert!(rpn("   ").unwrap().is_empty());
    }
}
