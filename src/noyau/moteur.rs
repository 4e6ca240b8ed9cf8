//! src/noyau/moteur.rs
//!
//! Moteur d'expressions : l'objet de longue vie que les collaborateurs
//! externes adressent (boucle interactive, historique, testeur).
//!
//! Rôle :
//! - détecter et valider une affectation `nom=expression`
//! - orchestrer lecture -> RPN -> évaluation
//! - posséder variables et constantes
//! - convertir toute défaillance en (texte, drapeau) à la frontière
//!
//! Contrats :
//! - aucune mutation partielle : une affectation en échec ne lie rien ;
//! - l'état de lecture est local à chaque appel, le moteur est réentrant
//!   d'un appel à l'autre ;
//! - l'énumération des variables suit l'ordre lexicographique des noms.

use std::collections::BTreeMap;

use super::erreur::ErreurCalc;
use super::eval::evaluer_rpn;
use super::nombre::Nombre;
use super::rpn::vers_rpn;

/// Mots de commande de la boucle interactive, interdits comme noms de
/// variables.
pub const NOMS_RESERVES: [&str; 7] = ["cls", "clh", "clv", "exit", "load", "save", "test"];

pub struct Moteur {
    variables: BTreeMap<String, Nombre>,
    constantes: BTreeMap<String, Nombre>,
}

impl Default for Moteur {
    fn default() -> Self {
        Moteur::nouveau()
    }
}

impl Moteur {
    pub fn nouveau() -> Moteur {
        let mut constantes = BTreeMap::new();
        constantes.insert("pi".to_string(), Nombre::depuis_texte("3.1415926535897932"));
        constantes.insert("e".to_string(), Nombre::depuis_texte("2.7182818284590452"));
        Moteur {
            variables: BTreeMap::new(),
            constantes,
        }
    }

    /// Évalue une expression ou une affectation.
    ///
    /// Retour : (texte, drapeau d'erreur). Une affectation réussie rend un
    /// texte vide ; une expression réussie rend le décimal canonique.
    pub fn evaluer(&mut self, texte: &str) -> (String, bool) {
        match self.evaluer_interne(texte) {
            Ok(resultat) => (resultat, false),
            Err(erreur) => (erreur.to_string(), true),
        }
    }

    fn evaluer_interne(&mut self, texte: &str) -> Result<String, ErreurCalc> {
        let (nom, expression) = match texte.find('=') {
            Some(position) => (
                Some(self.verifie_nom(&texte[..position])?),
                &texte[position + 1..],
            ),
            None => (None, texte),
        };

        let rpn = vers_rpn(expression, &self.constantes)?;
        if nom.is_some() && rpn.is_empty() {
            return Err(ErreurCalc::ExpressionManquante);
        }

        let resultat = evaluer_rpn(&rpn, &self.variables, &self.constantes)?;

        match nom {
            Some(nom) => {
                self.variables.insert(nom, resultat);
                Ok(String::new())
            }
            None => Ok(resultat.vers_texte(false)),
        }
    }

    /// Nom valide : suite non vide de lettres/chiffres ASCII ne commençant
    /// pas par un chiffre, hors mots réservés et constantes.
    fn verifie_nom(&self, brut: &str) -> Result<String, ErreurCalc> {
        let nom = brut.trim();
        if nom.is_empty()
            || nom.chars().next().is_some_and(|symbole| symbole.is_ascii_digit())
            || !nom.chars().all(|symbole| symbole.is_ascii_alphanumeric())
        {
            return Err(ErreurCalc::NomVariableIncorrect);
        }
        if NOMS_RESERVES.contains(&nom) || self.constantes.contains_key(nom) {
            return Err(ErreurCalc::NomVariableReserve);
        }
        Ok(nom.to_string())
    }

    /// Couples (nom, valeur) dans l'ordre des noms.
    pub fn vars(&self) -> impl Iterator<Item = (&String, &Nombre)> {
        self.variables.iter()
    }

    pub fn vider_variables(&mut self) {
        self.variables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Moteur;

    fn ok(moteur: &mut Moteur, texte: &str) -> String {
        let (resultat, erreur) = moteur.evaluer(texte);
        assert!(!erreur, "expr={texte:?} -> {resultat}");
        resultat
    }

    fn echec(moteur: &mut Moteur, texte: &str) -> String {
        let (resultat, erreur) = moteur.evaluer(texte);
        assert!(erreur, "expr={texte:?} -> {resultat}");
        resultat
    }

    #[test]
    fn expressions_de_base() {
        let mut moteur = Moteur::nouveau();
        assert_eq!(ok(&mut moteur, "2+6"), "8");
        assert_eq!(ok(&mut moteur, "3+4*2/(1-5)"), "1");
        assert_eq!(ok(&mut moteur, "2+5*7-3*(89+0.5)"), "-231.5");
        assert_eq!(
            ok(&mut moteur, "2 + 5 * 7 - 3 * (89 + 0.5                 )"),
            "-231.5"
        );
        assert_eq!(ok(&mut moteur, "2 + 5\n *\n 7\t\t - 3 * (89 + 0.5  \t\t)"), "-231.5");
        assert_eq!(ok(&mut moteur, "23.0056 - 1"), "22.0056");
        assert_eq!(ok(&mut moteur, "3 - 0.01"), "2.99");
        assert_eq!(ok(&mut moteur, "10 - - 2"), "12");
    }

    #[test]
    fn constantes_prechargees() {
        let mut moteur = Moteur::nouveau();
        assert_eq!(ok(&mut moteur, "pi"), "3.1415926535897932");
        assert_eq!(ok(&mut moteur, "e"), "2.7182818284590452");
        assert_eq!(
            ok(&mut moteur, "2 + pi * 7 - 2 * (89 + 0.5)"),
            "-155.0088514248714476"
        );
    }

    #[test]
    fn fautes_en_facade() {
        let mut moteur = Moteur::nouveau();
        assert_eq!(
            echec(&mut moteur, "2 + 5 * 7 - 3 * (89 + 0.5"),
            "Missing a close bracket!!!"
        );
        assert_eq!(
            echec(&mut moteur, "2 + 5 * 7 - 3 * 89 + 0.5)"),
            "Missing an open bracket!!!"
        );
        assert_eq!(
            echec(&mut moteur, "2 + pi * 7 ^ x * (89 + 0.5)"),
            "Incorrect symbol!!!"
        );
        assert_eq!(
            echec(&mut moteur, "2 + pi * 7 + x * (89 + 0.5)"),
            "Unknown variable!!!"
        );
        assert_eq!(
            echec(&mut moteur, "10.5 / 3"),
            "Division is not defined for decimals!!!"
        );
        assert_eq!(echec(&mut moteur, "10 / 0"), "Division by zero!!!");
    }

    #[test]
    fn affectations() {
        let mut moteur = Moteur::nouveau();
        assert_eq!(ok(&mut moteur, "x=23+34"), "");
        assert_eq!(ok(&mut moteur, "x % 5"), "2");
        assert_eq!(ok(&mut moteur, "x = 5"), "");
        assert_eq!(ok(&mut moteur, "x"), "5");
        assert_eq!(echec(&mut moteur, "x="), "Missing expression!!!");
    }

    #[test]
    fn noms_refuses() {
        let mut moteur = Moteur::nouveau();
        assert_eq!(echec(&mut moteur, "y/=34 -54"), "Incorrect variable name!!!");
        assert_eq!(echec(&mut moteur, "2y=34 -54"), "Incorrect variable name!!!");
        assert_eq!(echec(&mut moteur, "y,,=34 -54"), "Incorrect variable name!!!");
        assert_eq!(echec(&mut moteur, "y g=34 -54"), "Incorrect variable name!!!");
        assert_eq!(echec(&mut moteur, "=5"), "Incorrect variable name!!!");
        assert_eq!(echec(&mut moteur, "y=34 -54=x"), "Incorrect number!!!");
        assert_eq!(echec(&mut moteur, "pi=3"), "Prohibited variable name!!!");
        assert_eq!(echec(&mut moteur, "exit=1"), "Prohibited variable name!!!");
    }

    #[test]
    fn echec_ne_lie_rien() {
        let mut moteur = Moteur::nouveau();
        echec(&mut moteur, "z=1/0");
        assert_eq!(echec(&mut moteur, "z"), "Unknown variable!!!");
        assert_eq!(moteur.vars().count(), 0);
    }

    #[test]
    fn enumeration_ordonnee_et_remise_a_zero() {
        let mut moteur = Moteur::nouveau();
        ok(&mut moteur, "zeta=1");
        ok(&mut moteur, "alpha=2");
        ok(&mut moteur, "milieu=3");

        let noms: Vec<&str> = moteur.vars().map(|(nom, _)| nom.as_str()).collect();
        assert_eq!(noms, ["alpha", "milieu", "zeta"]);

        moteur.vider_variables();
        assert_eq!(moteur.vars().count(), 0);
        assert_eq!(
            echec(&mut moteur, "2 + pi * 7 + x * (89 + 0.5)"),
            "Unknown variable!!!"
        );
    }
}
