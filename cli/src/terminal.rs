pub mod colors;
pub mod dashboard;
pub mod logging;
pub mod print;
