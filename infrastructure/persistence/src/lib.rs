pub mod db;
pub mod course {
    pub mod entity;
    pub mod repository;
}
