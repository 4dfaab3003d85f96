#[macro_use]
extern crate derivative;

pub mod local_search;
