//! # grin
//!
//! `grin` estimates the genome repetitiveness index (GRI) of a k-mer histogram:
//! the fraction of all k-mer occurrences that come from k-mers seen at or above
//! a depth cutoff.
//!
//! The cutoff is either given by the user or estimated from the local extrema of
//! the histogram curve, see [`repeat::estimate_repeat_start`].
pub mod config;
pub mod error;
pub mod gri;
pub mod histogram;
pub mod repeat;
pub mod startup;
