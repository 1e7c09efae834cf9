#![allow(dead_code)]

use envload::EnvLoad;

#[derive(EnvLoad)]
enum Mode {
    Fast,
    Slow,
}

fn main() {}
