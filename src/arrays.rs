//! Array and list data structures.

pub mod base;
pub mod bit;
pub mod circular;
pub mod organized;
pub mod parallel;
pub mod sorted;

pub use base::BaseList;
pub use bit::{BitArray, IntoBit};
pub use circular::CircularArray;
pub use organized::OrganizedList;
pub use parallel::{ParallelArray, Record};
pub use sorted::SortedList;
