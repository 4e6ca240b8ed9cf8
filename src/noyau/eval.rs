//! Noyau — évaluation postfixe.
//!
//! Parcourt la file RPN avec une pile d'opérandes : les jetons numériques,
//! constantes et variables empilent une valeur ; un opérateur dépile deux
//! opérandes (le plus récent est l'opérande droit), applique l'opération et
//! rempile le résultat. L'unique valeur restante est le résultat.

use std::collections::BTreeMap;

use super::erreur::ErreurCalc;
use super::jetons::{GenreJeton, Jeton};
use super::nombre::Nombre;

pub fn evaluer_rpn(
    rpn: &[Jeton],
    variables: &BTreeMap<String, Nombre>,
    constantes: &BTreeMap<String, Nombre>,
) -> Result<Nombre, ErreurCalc> {
    let mut pile: Vec<Nombre> = Vec::new();

    for jeton in rpn {
        match jeton.genre {
            GenreJeton::Constante => {
                let valeur = constantes
                    .get(&jeton.texte)
                    .ok_or(ErreurCalc::VariableInconnue)?;
                pile.push(valeur.clone());
            }
            GenreJeton::Variable => {
                let valeur = variables
                    .get(&jeton.texte)
                    .ok_or(ErreurCalc::VariableInconnue)?;
                pile.push(valeur.clone());
            }
            GenreJeton::Nombre => pile.push(Nombre::depuis_texte(&jeton.texte)),
            GenreJeton::Operation => {
                let droite = pile.pop().ok_or(ErreurCalc::ExpressionIncorrecte)?;
                let gauche = pile.pop().ok_or(ErreurCalc::ExpressionIncorrecte)?;
                pile.push(applique(&gauche, &droite, &jeton.texte)?);
            }
            GenreJeton::ParentheseOuvrante | GenreJeton::ParentheseFermante => {
                return Err(ErreurCalc::ExpressionIncorrecte);
            }
        }
    }

    pile.pop().ok_or(ErreurCalc::ExpressionManquante)
}

fn applique(gauche: &Nombre, droite: &Nombre, operation: &str) -> Result<Nombre, ErreurCalc> {
    match operation {
        "+" => Ok(gauche.additionner(droite)),
        "-" => Ok(gauche.soustraire(droite)),
        "*" => Ok(gauche.multiplier(droite)),
        "/" => gauche.diviser(droite),
        "%" => gauche.modulo(droite),
        _ => Err(ErreurCalc::ExpressionIncorrecte),
    }
}
