#![allow(dead_code)]
// Bare words other than `nested` are rejected at compile time

use envbind::Record;

#[derive(Record)]
struct Config {
    #[tag(frobnicate)]
    pub name: String,
}

fn main() {}
