pub mod error;
pub mod health {
    pub mod routes;
}
pub mod security;
pub mod suggestion {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod tags;
