// Interface adapters: HTTP routing, wire protocol and the in-memory store.

pub mod handlers;
pub mod http;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod store;
