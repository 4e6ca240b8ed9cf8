// src/noyau/erreur.rs
//
// Erreurs du noyau.
//
// Les textes sont le format de sortie observable : le testeur de fichiers
// les compare tels quels et l'historique les rejoue. On ne les change pas.

use std::fmt;

/// Toute défaillance du pipeline (lexicale, syntaxique, nommage, sémantique).
///
/// Aucune ne traverse la frontière `Moteur::evaluer` autrement que sous la
/// forme (texte, drapeau d'erreur).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalc {
    // --- lexicales ---
    SymboleInvalide,
    TropDePoints,
    NombreInvalide,

    // --- syntaxiques ---
    OperandeManquante,
    OperationManquante,
    ExpressionIncorrecte,
    ParentheseOuvranteManquante,
    ParentheseFermanteManquante,
    DebutIncorrect,
    ExpressionManquante,

    // --- nommage ---
    NomVariableIncorrect,
    NomVariableReserve,

    // --- sémantiques ---
    VariableInconnue,
    DivisionParZero,
    DivisionDecimale,
    ModuloDecimal,
}

impl fmt::Display for ErreurCalc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texte = match self {
            ErreurCalc::SymboleInvalide => "Incorrect symbol!!!",
            ErreurCalc::TropDePoints => "Too much dots in number!!!",
            ErreurCalc::NombreInvalide => "Incorrect number!!!",

            ErreurCalc::OperandeManquante => "Missing operand!!!",
            ErreurCalc::OperationManquante => "Missing operation!!!",
            ErreurCalc::ExpressionIncorrecte => "Incorrect expression!!!",
            ErreurCalc::ParentheseOuvranteManquante => "Missing an open bracket!!!",
            ErreurCalc::ParentheseFermanteManquante => "Missing a close bracket!!!",
            ErreurCalc::DebutIncorrect => "Incorrect begin of expression!!!",
            ErreurCalc::ExpressionManquante => "Missing expression!!!",

            ErreurCalc::NomVariableIncorrect => "Incorrect variable name!!!",
            ErreurCalc::NomVariableReserve => "Prohibited variable name!!!",

            ErreurCalc::VariableInconnue => "Unknown variable!!!",
            ErreurCalc::DivisionParZero => "Division by zero!!!",
            ErreurCalc::DivisionDecimale => "Division is not defined for decimals!!!",
            ErreurCalc::ModuloDecimal => "Mod is not defined for decimals!!!",
        };
        f.write_str(texte)
    }
}

impl std::error::Error for ErreurCalc {}
