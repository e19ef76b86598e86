//! Catalog Module
//!
//! A self-contained library for managing the book catalog: paginated and
//! searchable listing, plus create, update, and delete over a single
//! `books` table.
//!
//! # Features
//!
//! - Listing policy that turns untrusted `page`/`size`/`term` query input
//!   into a bounded store query
//! - Field-level validation of submitted book forms
//! - Ready-to-use HTTP handlers, server-rendered views, and routes
//! - Database migrations included
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookshelf::catalog;
//!
//! // Get the migrations to run
//! for (name, sql) in catalog::migrations() {
//!     // Run migration...
//! }
//!
//! // Mount the routes
//! let app = Router::new()
//!     .nest("/books", catalog::routes())
//!     .with_state(app_state);
//!
//! // Use the library directly
//! let catalog = catalog::Catalog::new(connection);
//! let book = catalog.create_book(&input).await?;
//! ```

mod handler;
mod lib;
mod listing;
mod routes;
pub(crate) mod view;

// Re-export the core library types and functions
pub use lib::*;
pub use listing::*;

// Re-export the routes function
pub use routes::routes;

/// Returns the migrations for the catalog module.
///
/// These should be run during application startup to ensure the database
/// schema is up to date.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "catalog_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
