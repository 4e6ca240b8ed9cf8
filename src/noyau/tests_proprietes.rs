//! Tests de propriétés : lois algébriques + oracle croisé + campagne bornée.
//!
//! But : marteler l'arithmétique sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - tailles et profondeurs bornées, budget temps global
//! - oracle num-bigint : mêmes entrées, mêmes sorties attendues
//! - on accepte certaines erreurs attendues côté moteur (division par zéro,
//!   division/modulo décimal)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_traits::Zero;

use super::entier::Entier;
use super::moteur::Moteur;

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    etat: u64,
}

impl Rng {
    fn nouveau(graine: u64) -> Self {
        Self { etat: graine }
    }
    fn suivant_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.etat = self.etat.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.etat >> 32) as u32
    }
    fn tire(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.suivant_u32() % n
        }
    }
    fn pile_ou_face(&mut self) -> bool {
        (self.suivant_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(depart: Instant, max: Duration) {
    if depart.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs ------------------------ */

/// Texte décimal signé, avec parfois des zéros de tête (forme non canonique).
fn gen_entier(rng: &mut Rng, longueur_max: u32) -> String {
    let longueur = 1 + rng.tire(longueur_max) as usize;
    let mut texte = String::new();
    if rng.pile_ou_face() {
        texte.push('-');
    }
    for _ in 0..longueur {
        texte.push(char::from(b'0' + rng.tire(10) as u8));
    }
    texte
}

fn oracle(texte: &str) -> BigInt {
    BigInt::parse_bytes(texte.as_bytes(), 10).unwrap_or_else(|| panic!("oracle: {texte:?}"))
}

fn entier(texte: &str) -> Entier {
    Entier::depuis_decimal(texte)
}

/* ------------------------ Aller-retour textuel ------------------------ */

#[test]
fn proprietes_aller_retour_canonique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::nouveau(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);
        let texte = gen_entier(&mut rng, 40);
        // l'oracle donne la forme canonique (zéros de tête retirés, "0" sans signe)
        assert_eq!(
            entier(&texte).vers_texte(false),
            oracle(&texte).to_string(),
            "cas={texte:?}"
        );
    }
}

/* ------------------------ Lois algébriques ------------------------ */

#[test]
fn proprietes_addition_et_multiplication() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::nouveau(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);
        let (ta, tb, tc) = (
            gen_entier(&mut rng, 30),
            gen_entier(&mut rng, 30),
            gen_entier(&mut rng, 12),
        );
        let (a, b, c) = (entier(&ta), entier(&tb), entier(&tc));

        // commutativité + oracle
        let somme = a.additionner(&b);
        assert_eq!(somme.vers_texte(false), (oracle(&ta) + oracle(&tb)).to_string());
        assert_eq!(somme, b.additionner(&a));

        let produit = a.multiplier(&b);
        assert_eq!(produit.vers_texte(false), (oracle(&ta) * oracle(&tb)).to_string());
        assert_eq!(produit, b.multiplier(&a));

        // associativité de l'addition
        assert_eq!(
            a.additionner(&b).additionner(&c),
            a.additionner(&b.additionner(&c))
        );

        // distributivité
        assert_eq!(
            a.multiplier(&b.additionner(&c)),
            a.multiplier(&b).additionner(&a.multiplier(&c))
        );

        // soustraction = addition de l'opposé
        assert_eq!(
            a.soustraire(&b).vers_texte(false),
            (oracle(&ta) - oracle(&tb)).to_string()
        );
    }
}

/* ------------------------ Division tronquée ------------------------ */

#[test]
fn proprietes_division_invariante() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::nouveau(0xFEED_u64);

    let mut vus = 0usize;
    while vus < 120 {
        budget(t0, max);
        let ta = gen_entier(&mut rng, 36);
        let tb = gen_entier(&mut rng, 18);
        let ob = oracle(&tb);
        if ob.is_zero() {
            continue;
        }
        vus += 1;

        let (a, b) = (entier(&ta), entier(&tb));
        let (q, r) = a.diviser(&b).unwrap_or_else(|e| panic!("{ta} / {tb}: {e}"));

        // a = b*q + r
        assert_eq!(b.multiplier(&q).additionner(&r), a, "{ta} / {tb}");
        // |r| < |b|
        assert!(r.abs_inferieur(&b), "{ta} / {tb}");
        // signe du reste = signe du dividende (ou reste nul)
        assert!(
            r.est_zero() || r.est_negatif() == a.est_negatif(),
            "{ta} / {tb}"
        );

        // l'oracle tronque vers zéro lui aussi
        let oa = oracle(&ta);
        assert_eq!(q.vers_texte(false), (&oa / &ob).to_string(), "{ta} / {tb}");
        assert_eq!(r.vers_texte(false), (&oa % &ob).to_string(), "{ta} % {tb}");
    }
}

/* ------------------------ Campagne moteur bornée ------------------------ */

fn est_erreur_attendue(texte: &str) -> bool {
    // Liste blanche : fautes *normales* pour des expressions tirées au sort,
    // le domaine décimal étant volontairement limité.
    texte == "Division by zero!!!"
        || texte == "Division is not defined for decimals!!!"
        || texte == "Mod is not defined for decimals!!!"
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.tire(6) {
        0 => "pi".to_string(),
        1 => format!("{}.{}", rng.tire(50), 1 + rng.tire(99)),
        _ => format!("{}", rng.tire(1000)),
    }
}

fn gen_expression(rng: &mut Rng, profondeur: usize) -> String {
    if profondeur == 0 {
        return gen_atome(rng);
    }
    let gauche = gen_expression(rng, profondeur - 1);
    let droite = gen_expression(rng, profondeur - 1);
    match rng.tire(6) {
        0 => format!("({gauche}+{droite})"),
        1 => format!("({gauche}-{droite})"),
        2 => format!("({gauche}*{droite})"),
        3 => format!("({gauche}/{droite})"),
        4 => format!("({gauche}%{droite})"),
        _ => gen_atome(rng),
    }
}

#[test]
fn campagne_moteur_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::nouveau(0xD1CE_u64);

    let mut succes = 0usize;
    let mut fautes = 0usize;

    for _ in 0..200 {
        budget(t0, max);
        let expression = gen_expression(&mut rng, 4);

        let (premier, erreur1) = Moteur::nouveau().evaluer(&expression);
        let (second, erreur2) = Moteur::nouveau().evaluer(&expression);

        // même entrée, même état => même sortie
        assert_eq!(premier, second, "expr={expression:?}");
        assert_eq!(erreur1, erreur2, "expr={expression:?}");

        if erreur1 {
            assert!(
                est_erreur_attendue(&premier),
                "erreur non attendue: expr={expression:?} err={premier}"
            );
            fautes += 1;
        } else {
            succes += 1;
        }
    }

    // la campagne doit balayer les deux issues
    assert!(succes > 20, "trop peu de succès: {succes}");
    assert!(fautes > 0, "aucune faute vue: campagne trop sage");
}
