//! Low-level helpers shared by the decoders.

pub mod compression;
pub mod errors;
pub mod mem_reader;

#[cfg(test)]
pub(crate) mod testing;
