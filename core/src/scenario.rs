//! Scenario collection and measurement for the interactive benchmark.

use crate::prompt::{LineSource, Prompter};
use crate::sum::{regular_sum, unrolled_sum};
use crate::timing::time_once;
use anyhow::{Context, Result};
use std::io::Write;

pub const SCENARIO_COUNT_PROMPT: &str = "How many different scenarios would you like to test? ";
pub const FACTOR_PROMPT: &str = "Enter the unrolling factor: ";
pub const ELEMENTS_PROMPT: &str = "Enter the number of elements processed per iteration: ";
pub const RANGE_PROMPT: &str = "Enter the range size (total iterations): ";

/// One user-provided combination, as entered. Nothing is range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioParams {
    pub factor: i64,
    pub elements: i64,
    pub range_size: i64,
}

/// Parameters plus the two single-shot timings, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRecord {
    pub params: ScenarioParams,
    pub regular_secs: f64,
    pub unrolled_secs: f64,
}

impl ScenarioParams {
    pub fn prompt<S: LineSource, W: Write>(prompter: &mut Prompter<S, W>) -> Result<Self> {
        let factor = prompter.ask_int(FACTOR_PROMPT)?;
        let elements = prompter.ask_int(ELEMENTS_PROMPT)?;
        let range_size = prompter.ask_int(RANGE_PROMPT)?;
        Ok(Self {
            factor,
            elements,
            range_size,
        })
    }

    /// Times the regular loop over `range_size`, then the nested unrolled loop.
    pub fn measure(&self) -> Result<ScenarioRecord> {
        let regular = time_once(|| regular_sum(self.range_size));
        let unrolled = time_once(|| unrolled_sum(self.factor, self.elements, self.range_size))
            .transpose()
            .with_context(|| {
                format!(
                    "run unrolled loop (factor={}, elements={}, range={})",
                    self.factor, self.elements, self.range_size
                )
            })?;
        tracing::debug!(
            target: "unroll::scenario",
            factor = self.factor,
            elements = self.elements,
            range = self.range_size,
            regular_sum = %regular.value,
            unrolled_sum = %unrolled.value,
            regular_secs = regular.secs(),
            unrolled_secs = unrolled.secs(),
            "scenario measured"
        );
        Ok(ScenarioRecord {
            params: *self,
            regular_secs: regular.secs(),
            unrolled_secs: unrolled.secs(),
        })
    }
}

impl ScenarioRecord {
    /// The two report lines for the 1-based scenario `index`.
    pub fn report_lines(&self, index: usize) -> [String; 2] {
        [
            format!("Regular loop time for Scenario {}: {:.6} seconds", index, self.regular_secs),
            format!("Unrolled loop time for Scenario {}: {:.6} seconds", index, self.unrolled_secs),
        ]
    }
}

/// Asks for the scenario count, then collects, measures and reports each
/// scenario in turn. A count of zero or less yields no scenarios.
pub fn run_session<S: LineSource, W: Write>(prompter: &mut Prompter<S, W>) -> Result<Vec<ScenarioRecord>> {
    let count = prompter.ask_int(SCENARIO_COUNT_PROMPT)?;
    let count = usize::try_from(count).unwrap_or(0);
    let mut records = Vec::with_capacity(count.min(64));

    for index in 1..=count {
        let params = ScenarioParams::prompt(prompter)?;
        let record = params.measure()?;
        let out = prompter.out();
        for line in record.report_lines(index) {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        records.push(record);
    }

    Ok(records)
}
