use std::fmt;

/// Outcome recorded for one target in one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HealthSymbol {
    /// Probe exited with code 0.
    Success,
    /// Probe exited with the failure code its kind uses for "network check failed".
    Failure,
    /// Probe exited with any other code; the tool itself is broken or misused.
    Unknown,
    /// The tick ended before the probe finished.
    Pending,
}

impl HealthSymbol {
    pub fn glyph(&self) -> char {
        match self {
            HealthSymbol::Success => '*',
            HealthSymbol::Failure => 'X',
            HealthSymbol::Unknown => '?',
            HealthSymbol::Pending => '.',
        }
    }
}

impl fmt::Display for HealthSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
