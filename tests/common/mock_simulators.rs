//! Simulator doubles
//!
//! Stand-ins for the external simulator process, each with a predictable
//! answer.

use std::cell::RefCell;

use spyro_rs::pipeline::{Simulator, SimulatorError};
use spyro_rs::record::format::find_assignment;
use spyro_rs::record::{decode_feed, FeedFormat};

// =================================================================================================
// Canned output
// =================================================================================================

/// Answers every case with the same output record and keeps the inputs
pub struct CannedSimulator {
    output: String,
    pub inputs: RefCell<Vec<String>>,
}

impl CannedSimulator {
    pub fn new(output: &str) -> Self {
        Self { output: output.to_string(), inputs: RefCell::new(Vec::new()) }
    }
}

impl Simulator for CannedSimulator {
    fn name(&self) -> &str {
        "canned"
    }

    fn run(&self, input_record: &str) -> Result<String, SimulatorError> {
        self.inputs.borrow_mut().push(input_record.to_string());
        Ok(self.output.clone())
    }
}

// =================================================================================================
// Feed echo
// =================================================================================================

/// Reports the feed it was given as weight yields
///
/// The general section echoes the outlet temperature target as `COT`.
pub struct FeedEchoSimulator;

impl Simulator for FeedEchoSimulator {
    fn name(&self) -> &str {
        "feed-echo"
    }

    fn run(&self, input_record: &str) -> Result<String, SimulatorError> {
        let feed = decode_feed(input_record, FeedFormat::Primary)
            .map_err(|e| SimulatorError::Failed(e.to_string()))?;

        let mut output = String::from("[EFFLUENT]\n");
        for (name, weight) in feed.iter() {
            output.push_str(&format!("W{name} {weight:.5}\n"));
        }
        output.push_str("[EFFLUENT END]\n[SPYROGENERAL]\n");

        if let Some(range) = find_assignment(input_record, "TEMPO") {
            output.push_str(&format!("COT {}\n", &input_record[range]));
        }
        output.push_str("[SPYROGENERAL END]\n");
        Ok(output)
    }
}

// =================================================================================================
// Failure
// =================================================================================================

/// Fails every run
pub struct FailingSimulator;

impl Simulator for FailingSimulator {
    fn name(&self) -> &str {
        "failing"
    }

    fn run(&self, _input_record: &str) -> Result<String, SimulatorError> {
        Err(SimulatorError::Failed("no license available".to_string()))
    }
}
