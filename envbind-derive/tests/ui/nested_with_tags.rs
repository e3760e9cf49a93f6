#![allow(dead_code)]
// A nested record binds its own fields, so it cannot name a variable itself

use envbind::Record;

#[derive(Record)]
struct Config {
    #[tag(nested, env = "DB")]
    pub database: String,
}

fn main() {}
