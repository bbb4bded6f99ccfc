pub mod base_finder;
