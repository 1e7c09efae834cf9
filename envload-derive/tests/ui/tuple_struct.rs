#![allow(dead_code)]

use envload::EnvLoad;

#[derive(EnvLoad)]
struct Port(u16);

fn main() {}
