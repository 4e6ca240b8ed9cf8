//! Valeur numérique du calculateur : entier ou décimal.
//!
//! Type somme immuable : les opérations rendent de nouvelles valeurs, à la
//! seule exception du retournement de signe en place utilisé pour soustraire
//! par l'opposé.
//!
//! Règles de mélange :
//! - un entier combiné à un décimal est promu en décimal d'échelle nulle ;
//! - tout résultat décimal dont l'échelle retombe à zéro est rétrogradé en
//!   entier ;
//! - division et modulo n'existent que pour la paire entier/entier.

use super::decimal::Decimal;
use super::entier::Entier;
use super::erreur::ErreurCalc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nombre {
    Entier(Entier),
    Decimal(Decimal),
}

impl Nombre {
    /// Un point dans le texte donne un décimal, sinon un entier.
    pub fn depuis_texte(texte: &str) -> Nombre {
        if texte.contains('.') {
            Nombre::reduit(Decimal::depuis_texte(texte))
        } else {
            Nombre::Entier(Entier::depuis_decimal(texte))
        }
    }

    pub fn est_negatif(&self) -> bool {
        match self {
            Nombre::Entier(valeur) => valeur.est_negatif(),
            Nombre::Decimal(valeur) => valeur.est_negatif(),
        }
    }

    pub fn inverse_signe(&mut self) {
        match self {
            Nombre::Entier(valeur) => valeur.inverse_signe(),
            Nombre::Decimal(valeur) => valeur.inverse_signe(),
        }
    }

    pub fn vers_texte(&self, zero_signe: bool) -> String {
        match self {
            Nombre::Entier(valeur) => valeur.vers_texte(zero_signe),
            Nombre::Decimal(valeur) => valeur.vers_texte(zero_signe),
        }
    }

    pub fn additionner(&self, autre: &Nombre) -> Nombre {
        match (self, autre) {
            (Nombre::Entier(gauche), Nombre::Entier(droite)) => {
                Nombre::Entier(gauche.additionner(droite))
            }
            (Nombre::Entier(gauche), Nombre::Decimal(droite)) => {
                Nombre::reduit(Decimal::depuis_entier(gauche.clone()).additionner(droite))
            }
            (Nombre::Decimal(gauche), Nombre::Entier(droite)) => {
                Nombre::reduit(gauche.additionner(&Decimal::depuis_entier(droite.clone())))
            }
            (Nombre::Decimal(gauche), Nombre::Decimal(droite)) => {
                Nombre::reduit(gauche.additionner(droite))
            }
        }
    }

    pub fn soustraire(&self, autre: &Nombre) -> Nombre {
        let mut oppose = autre.clone();
        oppose.inverse_signe();
        self.additionner(&oppose)
    }

    pub fn multiplier(&self, autre: &Nombre) -> Nombre {
        match (self, autre) {
            (Nombre::Entier(gauche), Nombre::Entier(droite)) => {
                Nombre::Entier(gauche.multiplier(droite))
            }
            (Nombre::Entier(gauche), Nombre::Decimal(droite)) => {
                Nombre::reduit(Decimal::depuis_entier(gauche.clone()).multiplier(droite))
            }
            (Nombre::Decimal(gauche), Nombre::Entier(droite)) => {
                Nombre::reduit(gauche.multiplier(&Decimal::depuis_entier(droite.clone())))
            }
            (Nombre::Decimal(gauche), Nombre::Decimal(droite)) => {
                Nombre::reduit(gauche.multiplier(droite))
            }
        }
    }

    pub fn diviser(&self, autre: &Nombre) -> Result<Nombre, ErreurCalc> {
        match (self, autre) {
            (Nombre::Entier(gauche), Nombre::Entier(droite)) => {
                Ok(Nombre::Entier(gauche.diviser(droite)?.0))
            }
            _ => Err(ErreurCalc::DivisionDecimale),
        }
    }

    pub fn modulo(&self, autre: &Nombre) -> Result<Nombre, ErreurCalc> {
        match (self, autre) {
            (Nombre::Entier(gauche), Nombre::Entier(droite)) => {
                Ok(Nombre::Entier(gauche.diviser(droite)?.1))
            }
            _ => Err(ErreurCalc::ModuloDecimal),
        }
    }

    /// Rétrograde un décimal d'échelle nulle en entier.
    fn reduit(valeur: Decimal) -> Nombre {
        if valeur.est_entiere() {
            Nombre::Entier(valeur.en_entier())
        } else {
            Nombre::Decimal(valeur)
        }
    }
}
