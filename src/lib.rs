//! cdscheck: CDS translation and reconciliation for EMBL/GenBank feature annotation.

pub mod error;

pub mod amino_acid;
pub mod cli;
pub mod codon;
pub mod config;
pub mod feature;
pub mod input;
pub mod location;
pub mod resolver;
pub mod sequence;
pub mod strand;
pub mod translation;
pub mod translator;
pub mod validation;
