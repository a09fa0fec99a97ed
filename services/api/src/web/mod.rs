pub mod auth;
pub mod rest;
pub mod sessions;
pub mod state;
pub mod student;
pub mod volunteer;

// Re-export the master OpenAPI definition to make it easily accessible
// to the binaries that build the web server router and dump the spec.
pub use rest::ApiDoc;
