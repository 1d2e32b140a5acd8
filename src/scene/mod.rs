pub mod controller;
pub mod filter;
pub mod registry;
