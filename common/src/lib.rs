pub mod config;
pub mod health;
pub mod target;

#[doc(hidden)]
pub use tracing;

/// Logs a positive status line. The CLI formatter renders it with a green `[+]`.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "netdiag::success", $($arg)*)
    };
}
