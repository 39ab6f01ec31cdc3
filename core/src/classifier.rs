use netdiag_common::health::HealthSymbol;

/// Maps a probe's exit code to the symbol shown for it.
///
/// A failure code of 0 can never produce `Failure`, since 0 always means success.
pub fn classify(exit_code: i32, failure_code: i32) -> HealthSymbol {
    if exit_code == 0 {
        HealthSymbol::Success
    } else if exit_code == failure_code {
        HealthSymbol::Failure
    } else {
        HealthSymbol::Unknown
    }
}
