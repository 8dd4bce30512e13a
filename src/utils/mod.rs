pub mod dates;
pub mod roster_cache;
