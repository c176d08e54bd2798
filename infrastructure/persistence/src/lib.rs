pub mod db;
pub mod profile {
    pub mod entity;
    pub mod repository;
}
pub mod suggestion {
    pub mod entity;
    pub mod repository;
}
