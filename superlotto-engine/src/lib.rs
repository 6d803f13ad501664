pub mod bitset;
pub mod constraints;
pub mod features;
pub mod frequency;
pub mod generator;
pub mod pipeline;
pub mod prize;
pub mod sampler;

#[cfg(test)]
pub(crate) mod fixtures;
