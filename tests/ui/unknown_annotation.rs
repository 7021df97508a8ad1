#![allow(unused)]
use validoc::validoc;

/// Greet
///
/// @respons 200 () Typo in annotation
#[validoc]
async fn greet() {}

fn main() {}
