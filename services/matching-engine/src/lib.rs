//! Price-time priority matching engine for a single instrument
//!
//! Orders rest in a twin-sided book (bids descending, asks ascending) with
//! FIFO time priority per price level. Submissions match continuously
//! against the opposing side and return the resulting trades.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced
//! - The book is never left crossed after an operation
//! - Conservation of quantity between fills and trades
//! - FillAndKill, FillOrKill and market orders never rest

pub mod book;
pub mod clock;
pub mod engine;
pub mod matching;

pub use book::{Book, BookSnapshot};
pub use engine::MatchingEngine;
