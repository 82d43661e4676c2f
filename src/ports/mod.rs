pub mod navidrome;
