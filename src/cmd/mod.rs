pub mod cases;
pub mod summary;
pub mod wells;
