#![allow(unused)]
use validoc::validoc;

/// Greet
///
/// @response 200 () Greeting
/// @example 201 1
#[validoc]
async fn greet() {}

fn main() {}
