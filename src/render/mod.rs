//! Presentation of catalog entries and match results.
//!
//! The matcher only produces [`MatchResult`](crate::matching::MatchResult)
//! values; turning them into markup lives here so the core stays pure.

pub mod html;
