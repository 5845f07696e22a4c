//! Fixture crate compiling mappers generated by `fieldmap-gen`.

pub mod dto;
pub mod models;

/// Mappers generated from `mappers.yml` at build time.
pub mod mappers {
    include!(concat!(env!("OUT_DIR"), "/mappers_gen.rs"));
}
