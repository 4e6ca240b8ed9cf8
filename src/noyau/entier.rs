//! Entier signé de précision arbitraire.
//!
//! Représentation : signe + magnitude en membres de 32 bits, base 2³²,
//! poids faible en tête.
//!
//! Invariants :
//! - `membres` jamais vide ;
//! - pas de membre de poids fort nul, sauf pour le zéro (un seul membre `0`) ;
//! - le signe d'une magnitude nulle n'a pas de sens arithmétique mais peut
//!   transporter une polarité (résultats intermédiaires, rendu `zero_signe`).

use super::erreur::ErreurCalc;

#[derive(Clone, Debug)]
pub struct Entier {
    negatif: bool,
    membres: Vec<u32>,
}

impl Entier {
    pub fn zero() -> Entier {
        Entier::depuis_u32(0)
    }

    pub fn depuis_u32(valeur: u32) -> Entier {
        Entier {
            negatif: false,
            membres: vec![valeur],
        }
    }

    /// Construit un entier depuis un texte décimal (`['-'] chiffre+`).
    ///
    /// Conversion par moitiés successives : on divise la chaîne décimale par
    /// deux chiffre à chiffre, le reste donne le prochain bit, jusqu'à
    /// épuisement et complétion à un multiple de 32 bits.
    pub fn depuis_decimal(texte: &str) -> Entier {
        let (negatif, chiffres) = match texte.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, texte),
        };

        let mut tampon: Vec<u8> = chiffres
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|octet| octet - b'0')
            .collect();
        if tampon.is_empty() {
            tampon.push(0);
        }

        // bits poids faible d'abord
        let mut bits: Vec<u8> = Vec::new();
        while tampon != [0] || bits.len() % 32 != 0 {
            let mut reste = 0u8;
            for chiffre in tampon.iter_mut() {
                let valeur = *chiffre + reste * 10;
                reste = valeur % 2;
                *chiffre = valeur / 2;
            }
            while tampon.len() > 1 && tampon[0] == 0 {
                tampon.remove(0);
            }
            bits.push(reste);
        }
        bits.reverse();

        // paquets de 32 bits, poids fort d'abord, puis retournement
        let mut membres: Vec<u32> = Vec::with_capacity(bits.len() / 32);
        for paquet in bits.chunks(32) {
            let mut mot = 0u32;
            for bit in paquet {
                mot = (mot << 1) | u32::from(*bit);
            }
            membres.push(mot);
        }
        membres.reverse();
        if membres.is_empty() {
            membres.push(0);
        }

        Entier { negatif, membres }
    }

    /// Rendu décimal par doublements successifs : la suite de membres est vue
    /// comme une chaîne binaire que l'on divise par dix, chaque reste donnant
    /// un chiffre décimal (poids faible d'abord).
    ///
    /// `zero_signe` conserve le signe mémorisé même sur une magnitude nulle
    /// (`-0`), utile pour les valeurs intermédiaires.
    pub fn vers_texte(&self, zero_signe: bool) -> String {
        let mut bits: Vec<u8> = Vec::with_capacity(self.membres.len() * 32);
        for mot in self.membres.iter().rev() {
            for decalage in (0..32).rev() {
                bits.push(((mot >> decalage) & 1) as u8);
            }
        }

        let mut chiffres: Vec<u8> = Vec::new();
        while !(bits.len() == 1 && bits[0] == 0) {
            let mut reste = 0u8;
            for bit in bits.iter_mut() {
                reste = reste * 2 + *bit;
                if reste >= 10 {
                    *bit = 1;
                    reste -= 10;
                } else {
                    *bit = 0;
                }
            }
            chiffres.push(reste);
            while bits.len() > 1 && bits[0] == 0 {
                bits.remove(0);
            }
        }
        if chiffres.is_empty() {
            chiffres.push(0);
        }

        let texte: String = chiffres
            .iter()
            .rev()
            .map(|chiffre| char::from(chiffre + b'0'))
            .collect();

        let signe = if zero_signe {
            self.negatif
        } else {
            self.negatif && !self.est_zero()
        };
        if signe {
            format!("-{texte}")
        } else {
            texte
        }
    }

    pub fn est_zero(&self) -> bool {
        self.membres.len() == 1 && self.membres[0] == 0
    }

    pub fn est_negatif(&self) -> bool {
        self.negatif
    }

    /// Multiplication par -1, en place.
    pub fn inverse_signe(&mut self) {
        self.negatif = !self.negatif;
    }

    /// |self| < |autre| : longueur des membres, puis comparaison
    /// membre à membre depuis le poids fort.
    pub fn abs_inferieur(&self, autre: &Entier) -> bool {
        if self.membres.len() != autre.membres.len() {
            return self.membres.len() < autre.membres.len();
        }
        for (gauche, droite) in self.membres.iter().rev().zip(autre.membres.iter().rev()) {
            if gauche != droite {
                return gauche < droite;
            }
        }
        false
    }

    pub fn abs_egal(&self, autre: &Entier) -> bool {
        self.membres == autre.membres
    }

    /// Addition signée. Signes identiques : addition des magnitudes avec
    /// propagation de retenue. Signes opposés : soustraction de la petite
    /// magnitude à la grande, le résultat prend le signe de l'opérande de
    /// plus grande magnitude.
    pub fn additionner(&self, autre: &Entier) -> Entier {
        let mut resultat = if self.negatif == autre.negatif {
            Entier {
                negatif: self.negatif,
                membres: ajoute_magnitudes(&self.membres, &autre.membres),
            }
        } else {
            let (grand, petit) = if self.abs_inferieur(autre) {
                (autre, self)
            } else {
                (self, autre)
            };
            Entier {
                negatif: grand.negatif,
                membres: soustrait_magnitudes(&grand.membres, &petit.membres),
            }
        };
        resultat.normalise();
        resultat
    }

    /// Soustraction = addition de l'opposé.
    pub fn soustraire(&self, autre: &Entier) -> Entier {
        let mut oppose = autre.clone();
        oppose.inverse_signe();
        self.additionner(&oppose)
    }

    /// Produit scolaire membre à membre, O(n·m).
    ///
    /// Un opérande nul donne une magnitude nulle qui garde le signe XOR.
    pub fn multiplier(&self, autre: &Entier) -> Entier {
        let negatif = self.negatif != autre.negatif;

        if self.est_zero() || autre.est_zero() {
            return Entier {
                negatif,
                membres: vec![0],
            };
        }

        let mut membres = vec![0u32; self.membres.len() + autre.membres.len()];
        for (i, &droite) in autre.membres.iter().enumerate() {
            let mut retenue = 0u64;
            for (j, &gauche) in self.membres.iter().enumerate() {
                // produit partiel 64 bits + membre courant + retenue : tient
                // exactement dans u64
                let courant = u64::from(membres[i + j])
                    + u64::from(droite) * u64::from(gauche)
                    + retenue;
                membres[i + j] = courant as u32;
                retenue = courant >> 32;
            }
            let mut k = i + self.membres.len();
            while retenue != 0 {
                let courant = u64::from(membres[k]) + retenue;
                membres[k] = courant as u32;
                retenue = courant >> 32;
                k += 1;
            }
        }

        let mut resultat = Entier { negatif, membres };
        resultat.normalise();
        resultat
    }

    /// Division euclidienne tronquée vers zéro : renvoie (quotient, reste).
    ///
    /// Signe du quotient = XOR des signes ; le reste porte le signe du
    /// dividende, avec |reste| < |diviseur| et `a = b·q + r`.
    pub fn diviser(&self, autre: &Entier) -> Result<(Entier, Entier), ErreurCalc> {
        if autre.est_zero() {
            return Err(ErreurCalc::DivisionParZero);
        }

        let (quotient, reste) = if autre.membres.len() == 1 {
            self.divise_magnitude_mot(autre.membres[0])
        } else {
            self.divise_magnitude_longue(autre)
        };

        let mut quotient = Entier {
            negatif: self.negatif != autre.negatif,
            membres: quotient,
        };
        let mut reste = Entier {
            negatif: self.negatif,
            membres: reste,
        };
        quotient.normalise();
        reste.normalise();
        Ok((quotient, reste))
    }

    /// Division par un seul mot, signe du quotient hérité du dividende.
    /// Le diviseur est supposé non nul.
    pub(crate) fn divise_par_mot(&self, mot: u32) -> (Entier, u32) {
        let (membres, reste) = self.divise_magnitude_mot(mot);
        let mut quotient = Entier {
            negatif: self.negatif,
            membres,
        };
        quotient.normalise();
        (quotient, reste[0])
    }

    /// Diviseur à un seul membre : reste 64 bits glissant du poids fort vers
    /// le poids faible.
    fn divise_magnitude_mot(&self, diviseur: u32) -> (Vec<u32>, Vec<u32>) {
        let diviseur = u64::from(diviseur);
        let mut quotient = vec![0u32; self.membres.len()];
        let mut reste = 0u64;
        for rang in (0..self.membres.len()).rev() {
            let courant = (reste << 32) + u64::from(self.membres[rang]);
            quotient[rang] = (courant / diviseur) as u32;
            reste = courant % diviseur;
        }
        (quotient, vec![reste as u32])
    }

    /// Diviseur multi-membres : pour chaque membre du dividende (poids fort
    /// d'abord), le reste est décalé d'un membre puis le chiffre de quotient
    /// est obtenu par soustractions du diviseur mis à l'échelle des
    /// puissances de deux encore admissibles.
    fn divise_magnitude_longue(&self, autre: &Entier) -> (Vec<u32>, Vec<u32>) {
        let diviseur = Entier {
            negatif: false,
            membres: autre.membres.clone(),
        };

        if self.abs_inferieur(autre) {
            return (vec![0], self.membres.clone());
        }

        let mut reste = Entier::zero();
        // chiffres poids fort d'abord, retournés à la fin
        let mut chiffres: Vec<u32> = Vec::with_capacity(self.membres.len());

        for &membre in self.membres.iter().rev() {
            reste.membres.insert(0, membre);
            reste.normalise();

            if reste.abs_inferieur(&diviseur) {
                chiffres.push(0);
                continue;
            }

            let mut chiffre: u32 = 0;
            let mut etage = diviseur.clone();
            let mut facteur: u32 = 1;
            while !reste.abs_inferieur(&diviseur) {
                if reste.abs_inferieur(&etage) {
                    etage = diviseur.clone();
                    facteur = 1;
                }
                reste.membres = soustrait_magnitudes(&reste.membres, &etage.membres);
                reste.normalise();
                chiffre += facteur;
                // le débordement de `facteur` est rattrapé par la remise à 1
                // ci-dessus avant toute nouvelle accumulation
                etage = etage.additionner(&etage);
                facteur = facteur.wrapping_mul(2);
            }
            chiffres.push(chiffre);
        }

        chiffres.reverse();
        (chiffres, reste.membres)
    }

    /// Retire les membres de poids fort nuls, sans jamais descendre sous un
    /// membre.
    fn normalise(&mut self) {
        while self.membres.len() > 1 && *self.membres.last().unwrap_or(&0) == 0 {
            self.membres.pop();
        }
    }
}

/// ±0 sont égaux ; sinon signe puis magnitude.
impl PartialEq for Entier {
    fn eq(&self, autre: &Self) -> bool {
        if self.est_zero() && autre.est_zero() {
            return true;
        }
        self.negatif == autre.negatif && self.abs_egal(autre)
    }
}

impl Eq for Entier {}

impl PartialOrd for Entier {
    fn partial_cmp(&self, autre: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(autre))
    }
}

/// Ordre signé : le signe d'abord, puis la magnitude (inversée côté négatif).
impl Ord for Entier {
    fn cmp(&self, autre: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        if self == autre {
            return Ordering::Equal;
        }
        if self.negatif != autre.negatif {
            return if self.negatif {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let magnitude = if self.abs_inferieur(autre) {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        if self.negatif {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

/// Addition de magnitudes avec retenue, intermédiaires 64 bits.
fn ajoute_magnitudes(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, court) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut resultat = Vec::with_capacity(long.len() + 1);
    let mut retenue = 0u64;
    for (rang, &membre) in long.iter().enumerate() {
        let somme = u64::from(membre) + u64::from(*court.get(rang).unwrap_or(&0)) + retenue;
        resultat.push(somme as u32);
        retenue = somme >> 32;
    }
    if retenue != 0 {
        resultat.push(retenue as u32);
    }
    resultat
}

/// Soustraction de magnitudes avec emprunt ; `grand` >= `petit` exigé.
fn soustrait_magnitudes(grand: &[u32], petit: &[u32]) -> Vec<u32> {
    let mut resultat = Vec::with_capacity(grand.len());
    let mut emprunt = 0u64;
    for (rang, &membre) in grand.iter().enumerate() {
        let gauche = u64::from(membre);
        let droite = u64::from(*petit.get(rang).unwrap_or(&0)) + emprunt;
        if gauche >= droite {
            resultat.push((gauche - droite) as u32);
            emprunt = 0;
        } else {
            resultat.push((gauche + (1u64 << 32) - droite) as u32);
            emprunt = 1;
        }
    }
    resultat
}
