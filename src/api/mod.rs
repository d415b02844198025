//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `POST /lookup` - Return the first entry matching a request
//! - `POST /has` - Test whether a request is cached
//! - `PUT /entries` - Offer a response event for caching
//! - `GET /entries` - List entries in insertion order
//! - `DELETE /entries` - Remove every entry
//! - `POST /bust` - Remove the first entry matching a request
//! - `GET /stats` - Get cache statistics
//! - `GET /config` - Get the active cache options
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
