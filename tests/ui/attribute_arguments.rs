#![allow(unused)]
use validoc::validoc;

/// Greet
#[validoc(tag = "demo")]
async fn greet() {}

fn main() {}
