mod rest_store;

pub use rest_store::RestSessionStore;
