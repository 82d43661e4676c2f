pub mod navidrome;
pub mod playlist;
pub mod search;
