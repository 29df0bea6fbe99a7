pub mod discover;
pub mod recovery;
pub mod storage;
