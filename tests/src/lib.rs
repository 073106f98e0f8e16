#![cfg(test)]

mod deployment;
mod errors;
