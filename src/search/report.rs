use core::fmt;

use super::orchestrator::{Search, SearchRecord};

/// Literal written for a task whose trial budget ran out.
pub const NOT_FOUND: &str = "not found";

/// Plain-text summary of a finished run.
///
/// ```text
/// pointless curves y^2 = f(x) of genus 2
/// q_start = 2, max_trials = 1000
/// Weil bound: 13.928 (q <= 13)
/// degrees: [6]
///
/// d = 6
///   q = 3: 2*x^6 + x^3 + 2
///   q = 13: not found
/// ```
pub struct Report<'a> {
    search: &'a Search,
    records: &'a [SearchRecord],
}

impl<'a> Report<'a> {
    pub fn new(search: &'a Search, records: &'a [SearchRecord]) -> Self {
        Self { search, records }
    }

    /// Number of records carrying a pointless curve.
    pub fn found(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_found()).count()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.search.config();
        writeln!(
            f,
            "pointless curves y^{} = f(x) of genus {}",
            config.exponent, config.genus
        )?;
        writeln!(
            f,
            "q_start = {}, max_trials = {}",
            config.q_start, config.max_trials
        )?;
        writeln!(
            f,
            "Weil bound: {:.3} (q <= {})",
            self.search.bound(),
            self.search.cutoff()
        )?;
        writeln!(f, "degrees: {:?}", self.search.degrees())?;

        for &degree in self.search.degrees() {
            writeln!(f)?;
            writeln!(f, "d = {}", degree)?;
            for record in self.records.iter().filter(|r| r.degree == degree) {
                match record.outcome.polynomial() {
                    Some(poly) => writeln!(
                        f,
                        "  q = {}: {}",
                        record.order,
                        poly.display(record.field.as_ref())
                    )?,
                    None => writeln!(f, "  q = {}: {}", record.order, NOT_FOUND)?,
                }
            }
        }
        Ok(())
    }
}
