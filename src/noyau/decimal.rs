// src/noyau/decimal.rs
//
// Décimal exact : mantisse entière + échelle (nombre de chiffres après la
// virgule). Valeur = mantisse × 10⁻ᵉᶜʰᵉˡˡᵉ.
//
// Invariant : après chaque opération, les zéros décimaux de queue sont
// retirés (l'échelle est minimale pour la valeur représentée). Une échelle
// nulle signifie que la valeur est un entier.

use super::entier::Entier;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    mantisse: Entier,
    echelle: usize,
}

impl Decimal {
    /// Construit depuis un texte (`['-'] chiffre+ ['.' chiffre+]`).
    /// La mantisse concatène partie entière et partie fractionnaire,
    /// l'échelle compte les chiffres fractionnaires.
    pub fn depuis_texte(texte: &str) -> Decimal {
        match texte.split_once('.') {
            Some((partie_entiere, partie_fractionnaire)) => Decimal {
                mantisse: Entier::depuis_decimal(
                    &format!("{partie_entiere}{partie_fractionnaire}"),
                ),
                echelle: partie_fractionnaire.len(),
            },
            None => Decimal {
                mantisse: Entier::depuis_decimal(texte),
                echelle: 0,
            },
        }
    }

    pub fn depuis_entier(mantisse: Entier) -> Decimal {
        Decimal {
            mantisse,
            echelle: 0,
        }
    }

    pub fn est_entiere(&self) -> bool {
        self.echelle == 0
    }

    /// Rend la mantisse en abandonnant l'échelle (valide si `est_entiere`).
    pub fn en_entier(self) -> Entier {
        self.mantisse
    }

    pub fn est_negatif(&self) -> bool {
        self.mantisse.est_negatif()
    }

    pub fn inverse_signe(&mut self) {
        self.mantisse.inverse_signe();
    }

    /// Rendu : mantisse complétée de zéros de tête jusqu'à dépasser
    /// l'échelle, virgule insérée à `echelle` chiffres de la droite.
    pub fn vers_texte(&self, zero_signe: bool) -> String {
        let mut texte = self.mantisse.vers_texte(zero_signe);
        let decalage = usize::from(texte.starts_with('-'));
        while texte.len() - decalage <= self.echelle {
            texte.insert(decalage, '0');
        }
        if self.echelle > 0 {
            texte.insert(texte.len() - self.echelle, '.');
        }
        texte
    }

    /// Addition par alignement : l'opérande de plus petite échelle est
    /// multiplié par dix jusqu'à l'échelle commune, puis les mantisses
    /// s'additionnent.
    pub fn additionner(&self, autre: &Decimal) -> Decimal {
        let echelle = self.echelle.max(autre.echelle);
        let gauche = monte_echelle(&self.mantisse, self.echelle, echelle);
        let droite = monte_echelle(&autre.mantisse, autre.echelle, echelle);

        let mut resultat = Decimal {
            mantisse: gauche.additionner(&droite),
            echelle,
        };
        resultat.coupe_zeros_superflus();
        resultat
    }

    pub fn soustraire(&self, autre: &Decimal) -> Decimal {
        let mut oppose = autre.clone();
        oppose.inverse_signe();
        self.additionner(&oppose)
    }

    /// Produit des mantisses, somme des échelles.
    pub fn multiplier(&self, autre: &Decimal) -> Decimal {
        let mut resultat = Decimal {
            mantisse: self.mantisse.multiplier(&autre.mantisse),
            echelle: self.echelle + autre.echelle,
        };
        resultat.coupe_zeros_superflus();
        resultat
    }

    fn coupe_zeros_superflus(&mut self) {
        while self.echelle > 0 {
            let (quotient, reste) = self.mantisse.divise_par_mot(10);
            if reste != 0 {
                break;
            }
            self.mantisse = quotient;
            self.echelle -= 1;
        }
    }
}

fn monte_echelle(mantisse: &Entier, depuis: usize, vers: usize) -> Entier {
    let dix = Entier::depuis_u32(10);
    let mut resultat = mantisse.clone();
    for _ in depuis..vers {
        resultat = resultat.multiplier(&dix);
    }
    resultat
}

#[cfg(test)]
mod tests {
    use super::Decimal;

    fn decimal(texte: &str) -> Decimal {
        Decimal::depuis_texte(texte)
    }

    fn somme(a: &str, b: &str) -> String {
        decimal(a).additionner(&decimal(b)).vers_texte(true)
    }

    #[test]
    fn rendu() {
        assert_eq!(decimal("100").vers_texte(false), "100");
        assert_eq!(decimal("100.25").vers_texte(false), "100.25");
        assert_eq!(decimal("0.00951").vers_texte(false), "0.00951");
        assert_eq!(decimal("-0.3").vers_texte(false), "-0.3");
    }

    #[test]
    fn addition_alignement() {
        assert_eq!(somme("0.9", "0.1"), "1");
        assert_eq!(somme("0.9", "0.025"), "0.925");
        assert_eq!(somme("0.9", "0.1025"), "1.0025");
        assert_eq!(somme("0.00951", "0.00050"), "0.01001");
        assert_eq!(somme("1", "-0.5"), "0.5");
        assert_eq!(somme("2878348.00009374592340234", "872354.007264544"),
            "3750702.00735828992340234");
    }

    #[test]
    fn addition_signee() {
        assert_eq!(somme("0.2", "-0.5"), "-0.3");
        assert_eq!(somme("3.5", "-2.7"), "0.8");
        assert_eq!(somme("1.5", "-2.7"), "-1.2");
        assert_eq!(somme("1.5", "-2.3"), "-0.8");
        assert_eq!(somme("2.5", "-2.7"), "-0.2");
        assert_eq!(somme("1.5", "-0.007"), "1.493");
        assert_eq!(somme("1.015", "-0.0067"), "1.0083");
        assert_eq!(somme("2.015", "-3.006"), "-0.991");
        assert_eq!(somme("2.5", "-3.5"), "-1");
        assert_eq!(somme("2.7", "-3.5"), "-0.8");
        assert_eq!(somme("7.5", "-3.5"), "4");
        assert_eq!(somme("7.8", "-3.2"), "4.6");
        assert_eq!(somme("7.000154", "-3.000061"), "4.000093");
        assert_eq!(somme("0.000154", "-3.000061"), "-2.999907");
        assert_eq!(somme("0.000154", "-3.000154"), "-3");
        assert_eq!(somme("2364.0003945", "-978542.0029345254"), "-976178.0025400254");
    }

    #[test]
    fn zero_signe_conserve() {
        // magnitude nulle, signe du plus grand opérande (le gauche)
        assert_eq!(somme("-3.000865401", "3.000865401"), "-0");
        assert_eq!(
            decimal("-3.000865401")
                .additionner(&decimal("3.000865401"))
                .vers_texte(false),
            "0"
        );
    }

    #[test]
    fn coupe_des_zeros() {
        assert_eq!(somme("1.045", "-0.005"), "1.04");
        let resultat = decimal("0.9").additionner(&decimal("0.1"));
        assert!(resultat.est_entiere());
    }

    #[test]
    fn multiplication() {
        let produit = decimal("1.12").multiplier(&decimal("25.034"));
        assert_eq!(produit.vers_texte(false), "28.03808");
        let carre = decimal("1.12").multiplier(&decimal("1.12"));
        assert_eq!(carre.vers_texte(false), "1.2544");
    }
}
