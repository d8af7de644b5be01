pub mod api;
pub mod database_ops;
pub mod ingest;
pub mod normalization;

pub mod util {
    pub mod env;
}
