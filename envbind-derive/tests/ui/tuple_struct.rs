#![allow(dead_code)]
// Fields are identified by name, so tuple structs are rejected

use envbind::Record;

#[derive(Record)]
struct Port(pub u16);

fn main() {}
