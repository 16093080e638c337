//! Extraction strategies, in chain order.

pub mod direct;
pub mod display_name;
pub mod full_address;
pub mod postal;
pub mod state_scan;
pub mod url_slug;

pub use direct::DirectTags;
pub use display_name::DisplayName;
pub use full_address::FullAddress;
pub use postal::PostalCode;
pub use state_scan::StateNameScan;
pub use url_slug::UrlSlug;
