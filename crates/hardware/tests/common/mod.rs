
/// `TestContext`: a simulator with captured console output.
pub mod harness;
