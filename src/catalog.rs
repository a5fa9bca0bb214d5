//! Album catalog: the provider seam, the local directory provider, the
//! in-memory cache of albums and track lists, and track title normalization.

mod cache;
mod local;
mod model;
mod provider;
mod title;

pub use cache::Catalog;
pub use local::LocalCatalog;
pub use model::Track;
pub use provider::CatalogProvider;
pub use title::{KNOWN_EXTENSIONS, display_title};

#[cfg(test)]
pub(crate) mod testing;
