// Composition root for the time tracking service.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the store and wire it into the use case handlers.
// - Expose the HTTP router and the GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
