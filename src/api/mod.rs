// HTTP surface: the /info summary endpoint

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
