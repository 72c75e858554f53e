#![allow(dead_code)]

pub mod factories;
pub mod test_db;

pub use factories::BookFactory;
pub use test_db::TestDb;
