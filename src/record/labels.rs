//! Renaming tables for scalar outputs
//!
//! The simulator reports general and firebox performance under short
//! codes. These tables give every known code a descriptive label with its
//! unit. They are data: extend them when the simulator version adds codes.

/// `[SPYROGENERAL]` code → label
pub const GENERAL_LABELS: [(&str, &str); 25] = [
    ("COT", "Coil outlet temperature (°C)"),
    ("COP", "Coil outlet pressure (bar abs)"),
    ("CIT", "Coil inlet temperature (°C)"),
    ("CIP", "Coil inlet pressure (bar abs)"),
    ("XOT", "Crossover temperature (°C)"),
    ("DPCOIL", "Coil pressure drop (bar)"),
    ("HCFLOW", "Hydrocarbon flow per coil (kg/h)"),
    ("STFLOW", "Dilution steam flow per coil (kg/h)"),
    ("SHC", "Steam to hydrocarbon ratio (kg/kg)"),
    ("NCOILS", "Number of coils (-)"),
    ("RESTIM", "Residence time (s)"),
    ("KSF", "Kinetic severity function (-)"),
    ("PERAT", "Propylene/ethylene ratio (wt/wt)"),
    ("MPRAT", "Methane/propylene ratio (wt/wt)"),
    ("EERAT", "Ethylene/ethane ratio (wt/wt)"),
    ("CONV", "Key component conversion (wt%)"),
    ("QABS", "Absorbed duty per coil (kW)"),
    ("QTOT", "Total absorbed duty (MW)"),
    ("FLUXAV", "Average heat flux (kW/m2)"),
    ("FLUXMX", "Maximum heat flux (kW/m2)"),
    ("TMTSOR", "Tube metal temperature, start of run (°C)"),
    ("TMTMAX", "Maximum tube metal temperature (°C)"),
    ("COKERT", "Maximum coking rate (mm/day)"),
    ("RUNLEN", "Estimated run length (days)"),
    ("ITER", "Convergence iterations (-)"),
];

/// `[FIREBOX]` / `[PERFORM]` code → label
pub const FIREBOX_LABELS: [(&str, &str); 45] = [
    ("QFIRED", "Fired duty (MW)"),
    ("QABS", "Duty absorbed by coils (MW)"),
    ("QCONV", "Convection section duty (MW)"),
    ("QLOSS", "Wall heat loss (MW)"),
    ("QFLUE", "Flue gas heat at bridgewall (MW)"),
    ("EFFRAD", "Radiant efficiency (%)"),
    ("EFFTOT", "Overall furnace efficiency (%)"),
    ("FUELFL", "Fuel gas flow (kg/h)"),
    ("FUELLHV", "Fuel lower heating value (kJ/kg)"),
    ("FUELT", "Fuel gas temperature (°C)"),
    ("FUELMW", "Fuel gas molecular weight (kg/kmol)"),
    ("FUELH2", "Hydrogen in fuel gas (mol%)"),
    ("FUELCH4", "Methane in fuel gas (mol%)"),
    ("AIRFL", "Combustion air flow (kg/h)"),
    ("AIRT", "Combustion air temperature (°C)"),
    ("EXCAIR", "Excess air (%)"),
    ("O2DRY", "Oxygen in flue gas, dry (vol%)"),
    ("O2WET", "Oxygen in flue gas, wet (vol%)"),
    ("CO2FG", "Carbon dioxide in flue gas (vol%)"),
    ("H2OFG", "Water in flue gas (vol%)"),
    ("N2FG", "Nitrogen in flue gas (vol%)"),
    ("FGFL", "Flue gas flow (kg/h)"),
    ("FGMW", "Flue gas molecular weight (kg/kmol)"),
    ("BWT", "Bridgewall temperature (°C)"),
    ("FGTOUT", "Flue gas temperature at radiant exit (°C)"),
    ("FGTSTK", "Stack temperature (°C)"),
    ("TGMAX", "Maximum gas temperature (°C)"),
    ("TGAVG", "Average gas temperature (°C)"),
    ("TWALLMX", "Maximum refractory wall temperature (°C)"),
    ("TWALLAV", "Average refractory wall temperature (°C)"),
    ("TMTMAX", "Maximum tube metal temperature (°C)"),
    ("TMTAVG", "Average tube metal temperature (°C)"),
    ("FLUXMX", "Maximum heat flux (kW/m2)"),
    ("FLUXAV", "Average heat flux (kW/m2)"),
    ("FLXRAT", "Peak to average flux ratio (-)"),
    ("NBURNF", "Number of floor burners (-)"),
    ("NBURNW", "Number of wall burners (-)"),
    ("FLOORF", "Floor burner firing fraction (-)"),
    ("HEATRL", "Heat release per burner (MW)"),
    ("DRAFT", "Draft at arch (mbar)"),
    ("BOXH", "Firebox height (m)"),
    ("BOXL", "Firebox length (m)"),
    ("BOXW", "Firebox width (m)"),
    ("EMISW", "Refractory emissivity (-)"),
    ("EMIST", "Tube emissivity (-)"),
];

/// Label of a `[SPYROGENERAL]` code
///
/// ```rust
/// use spyro_rs::record::labels::general_label;
///
/// assert_eq!(general_label("COT"), Some("Coil outlet temperature (°C)"));
/// assert_eq!(general_label("XYZ"), None);
/// ```
pub fn general_label(code: &str) -> Option<&'static str> {
    lookup(&GENERAL_LABELS, code)
}

/// Label of a firebox performance code
pub fn firebox_label(code: &str) -> Option<&'static str> {
    lookup(&FIREBOX_LABELS, code)
}

fn lookup(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| *label)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique(table: &[(&str, &str)]) {
        let codes: HashSet<_> = table.iter().map(|(code, _)| code).collect();
        let labels: HashSet<_> = table.iter().map(|(_, label)| label).collect();
        assert_eq!(codes.len(), table.len(), "duplicate code");
        assert_eq!(labels.len(), table.len(), "duplicate label");
    }

    #[test]
    fn test_tables_have_unique_codes_and_labels() {
        assert_unique(&GENERAL_LABELS);
        assert_unique(&FIREBOX_LABELS);
    }

    #[test]
    fn test_shared_codes_resolve_per_table() {
        assert_eq!(general_label("QABS"), Some("Absorbed duty per coil (kW)"));
        assert_eq!(firebox_label("QABS"), Some("Duty absorbed by coils (MW)"));
    }
}
