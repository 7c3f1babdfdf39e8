//! Records and laboratory tables shared by the integration tests
//!
//! The naphtha sample is built so that every family total reported by the
//! laboratory matches the detailed analysis exactly.

use spyro_rs::feed::{
    ComponentTranslator, PionaFamily, RawComposition, RawRow, RawValue, TranslationEntry,
    WEIGHT_PERCENT_UNIT,
};

// =================================================================================================
// Laboratory side
// =================================================================================================

/// Dutch laboratory names → simulator keys
pub fn naphtha_translator() -> ComponentTranslator {
    use PionaFamily::*;

    ComponentTranslator::new(vec![
        TranslationEntry::new("n-Butaan", "NC4", Paraffin),
        TranslationEntry::new("i-Pentaan", "IC5", Isoparaffin),
        TranslationEntry::new("n-Pentaan", "NC5", Paraffin),
        TranslationEntry::new("Cyclopentaan", "CC5", Naphthene),
        TranslationEntry::new("2-Methylpentaan", "IC6", Isoparaffin),
        TranslationEntry::new("3-Methylpentaan", "IC6", Isoparaffin),
        TranslationEntry::new("n-Hexaan", "NC6", Paraffin),
        TranslationEntry::new("Methylcyclopentaan", "MCC5", Naphthene),
        TranslationEntry::new("Benzeen", "BENZ", Aromatic),
        TranslationEntry::new("n-Heptaan", "NC7", Paraffin),
        TranslationEntry::new("Tolueen", "TOL", Aromatic),
        TranslationEntry::new("Cyclohexaan", "CC6", Naphthene),
        TranslationEntry::new("Penteen-1", "C5H10", Olefin),
        TranslationEntry::new("Hexeen-1", "C6H12", Olefin),
        TranslationEntry::new("i-Heptaan", "IC7", Isoparaffin),
        // Known to the laboratory, not modelled by the simulator
        TranslationEntry::new("Zwavel", "", Paraffin),
    ])
}

/// Detailed rows of a 100 wt% naphtha sample
///
/// P 47.5, I 32.0, O 1.0, A 5.5 and N 14.0 wt%.
pub fn naphtha_rows() -> Vec<RawRow> {
    vec![
        RawRow::weight_percent("n-Butaan", 2.5),
        RawRow::weight_percent("i-Pentaan", 12.0),
        RawRow::weight_percent("n-Pentaan", 18.0),
        RawRow::weight_percent("Cyclopentaan", 3.0),
        RawRow::weight_percent("2-Methylpentaan", 10.0),
        RawRow::weight_percent("3-Methylpentaan", 5.0),
        RawRow::weight_percent("n-Hexaan", 15.0),
        RawRow::weight_percent("Methylcyclopentaan", 6.0),
        RawRow::weight_percent("Benzeen", 2.5),
        RawRow::weight_percent("n-Heptaan", 12.0),
        RawRow::weight_percent("Tolueen", 3.0),
        RawRow::weight_percent("Cyclohexaan", 5.0),
        RawRow::weight_percent("Penteen-1", 1.0),
        RawRow::new("Hexeen-1", WEIGHT_PERCENT_UNIT, RawValue::BelowDetection),
        RawRow::weight_percent("i-Heptaan", 5.0),
    ]
}

/// Full laboratory table: detailed rows, family totals and a density row
pub fn naphtha_sample() -> RawComposition {
    let mut raw = RawComposition::new(naphtha_rows());
    raw.push(RawRow::weight_percent("Totaal aromaten(gew)", 5.5));
    raw.push(RawRow::weight_percent("Totaal iso-paraffinen(gew)", 32.0));
    raw.push(RawRow::weight_percent("Totaal n-paraffinen(gew)", 47.5));
    raw.push(RawRow::weight_percent("Totaal olefinen(gew)", 1.0));
    raw.push(RawRow::new("Dichtheid 15C", "KG_M3", 682.4));
    raw
}

// =================================================================================================
// Simulator side
// =================================================================================================

/// Input template with a feed block and a furnace block
pub const TEMPLATE: &str = "\
TITLE=NAPHTHA CRACKING
KEYW=&NAME
    C2H6=1.00000, *
    C3H8=99.00000, END
KEYW=&FURN
    CONOP=1, TEMPO=835.0, CONVAL=0.0, SHC=0.5, END
";

/// Output record of one case, with an unconverged effluent pass first
pub const OUTPUT_RECORD: &str = "\
SPYRO OUTPUT
[EFFLUENT]
WH2 0.70 WCH4 12.9 WC2H4 24.1
[EFFLUENT END]
ITERATION 2
[EFFLUENT]
WH2 0.92 WCH4 14.6 WC2H4 27.3 WC3H6 15.8 WC2H6 3.9
VC2H4 29.4 VC3H6 11.2
RC4H4 0.08 RBUTAD 4.7 RB1 1.2 RB2C 0.4 RB2T 0.5 RIB 1.6 RNBUTA 0.6 RIBUTA 0.2
RBENZ 6.9 RTOL 3.3 RXYL 1.1 RC9+ 2.4
HCPYGAS 1.08 MWPYGAS 9.21D+01 MWEFF 27.6
DILSTM 0.5 SEVER 1.02
[EFFLUENT END]
[SPYROGENERAL]
COT 842.0 COP 1.82 CIT 602.5
KSF 2.35 PERAT 0.57 RUNLEN 64.0
QTOT 2.1D+01 ITER 7 XNEW 3.0
[SPYROGENERAL END]
[FIREBOX]
[COILS]
NCOIL 8 LCOIL 42.0
[PERFORM]
QFIRED 48.3 QABS 20.9 EFFRAD 43.3 EXCAIR 12.0 BWT 1105.0
QCONV 21.4 QLOSS 1.0
[FIREBOX END]
";
