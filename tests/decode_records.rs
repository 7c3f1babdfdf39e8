//! Integration tests: output record decoding
//!
//! Decodes a complete output record with repeated effluent passes, a
//! general section and a firebox block.

use approx::assert_relative_eq;
use std::collections::HashSet;

use spyro_rs::record::{
    decode_effluent, decode_firebox, decode_general, decode_output, DecodeOptions,
    EffluentCategory, FireboxResult, RecordError, RAW_C4_COMPONENTS,
};

mod common;
use common::OUTPUT_RECORD;

// =================================================================================================
// Effluent
// =================================================================================================

#[test]
fn test_last_effluent_pass_is_decoded() {
    let effluent = decode_effluent(OUTPUT_RECORD).unwrap();

    assert_eq!(effluent.weight.get("C2H4"), Some(27.3));
    assert_eq!(effluent.weight.get("C3H6"), Some(15.8));
    assert_eq!(effluent.weight.len(), 5);
    assert_eq!(effluent.volume.get("C3H6"), Some(11.2));
    assert_eq!(effluent.misc.get("SEVER"), Some(1.02));
}

#[test]
fn test_fortran_exponents_are_read() {
    let effluent = decode_effluent(OUTPUT_RECORD).unwrap();
    assert_relative_eq!(effluent.molecular_weight.get("PYGAS").unwrap(), 92.1, epsilon = 1e-9);
    assert_eq!(effluent.molecular_weight.get("EFF"), Some(27.6));
    assert_eq!(effluent.hc_ratio.get("PYGAS"), Some(1.08));
}

#[test]
fn test_raw_c4_and_pygas_partition_c4_pygas() {
    let effluent = decode_effluent(OUTPUT_RECORD).unwrap();

    let all: HashSet<&str> = effluent.c4_pygas.names().collect();
    let raw_c4: HashSet<&str> = effluent.raw_c4.names().collect();
    let pygas: HashSet<&str> = effluent.pygas.names().collect();

    assert_eq!(all.len(), 12);
    assert_eq!(raw_c4, HashSet::from(RAW_C4_COMPONENTS));
    assert_eq!(pygas, HashSet::from(["BENZ", "TOL", "XYL", "C9+"]));
    assert!(raw_c4.is_disjoint(&pygas));
    assert_eq!(&raw_c4 | &pygas, all);

    for (name, value) in effluent.c4_pygas.iter() {
        let part = effluent.raw_c4.get(name).or_else(|| effluent.pygas.get(name));
        assert_eq!(part, Some(value));
    }
    assert_eq!(
        effluent.category(EffluentCategory::RawC4).total(),
        effluent.raw_c4.total()
    );
}

// =================================================================================================
// Scalar sections
// =================================================================================================

#[test]
fn test_general_section() {
    let general = decode_general(OUTPUT_RECORD, &DecodeOptions::default()).unwrap();

    assert_eq!(general.len(), 9);
    assert_eq!(general.get("Coil outlet temperature (°C)"), Some(842.0));
    assert_eq!(general.get("Estimated run length (days)"), Some(64.0));
    assert_relative_eq!(general.get("Total absorbed duty (MW)").unwrap(), 21.0, epsilon = 1e-9);
    assert_eq!(general.get("XNEW"), Some(3.0));

    let dropped = decode_general(OUTPUT_RECORD, &DecodeOptions::drop_unmapped()).unwrap();
    assert_eq!(dropped.len(), 8);
    assert!(dropped.iter().all(|value| value.label != value.code));
}

#[test]
fn test_firebox_performance() {
    let firebox = decode_firebox(OUTPUT_RECORD, &DecodeOptions::default()).unwrap();
    let performance = firebox.performance().expect("record has a [PERFORM] block");

    // Only the first line of the block is the summary
    assert_eq!(performance.len(), 5);
    assert_eq!(performance.get("Fired duty (MW)"), Some(48.3));
    assert_eq!(performance.get("Duty absorbed by coils (MW)"), Some(20.9));
    assert_eq!(performance.get("Bridgewall temperature (°C)"), Some(1105.0));
    assert_eq!(performance.get_code("QCONV"), None);
}

#[test]
fn test_record_without_firebox() {
    let end = OUTPUT_RECORD.find("[FIREBOX]").unwrap();
    let output = decode_output(&OUTPUT_RECORD[..end], &DecodeOptions::default()).unwrap();

    assert_eq!(output.firebox, FireboxResult::Absent);
    assert_eq!(output.general.get_code("COT"), Some(842.0));
}

#[test]
fn test_whole_record_decoding_is_repeatable() {
    let options = DecodeOptions::default();
    assert_eq!(
        decode_output(OUTPUT_RECORD, &options).unwrap(),
        decode_output(OUTPUT_RECORD, &options).unwrap()
    );
}

// =================================================================================================
// Format errors
// =================================================================================================

#[test]
fn test_truncated_records_fail() {
    let options = DecodeOptions::default();

    let cut = OUTPUT_RECORD.find("[SPYROGENERAL END]").unwrap();
    assert!(matches!(
        decode_general(&OUTPUT_RECORD[..cut], &options),
        Err(RecordError::UnterminatedSection { .. })
    ));

    let cut = OUTPUT_RECORD.rfind("[EFFLUENT END]").unwrap();
    assert!(matches!(
        decode_effluent(&OUTPUT_RECORD[..cut]),
        Err(RecordError::UnterminatedSection { .. })
    ));

    assert!(matches!(
        decode_output("", &options),
        Err(RecordError::MissingMarker { .. })
    ));
}

#[test]
fn test_corrupted_value_fails() {
    let corrupted = OUTPUT_RECORD.replace("WC3H6 15.8", "WC3H6 *****");
    assert_eq!(
        decode_effluent(&corrupted),
        Err(RecordError::InvalidNumber {
            section: "[EFFLUENT]".to_string(),
            token: "WC3H6 *****".to_string(),
        })
    );
}
