pub mod alias_allocator;
pub mod listing;
pub mod resolver;
pub mod shortener;

pub use alias_allocator::AliasAllocator;
pub use listing::ListingService;
pub use resolver::{RedirectResolver, Resolution};
pub use shortener::{ShortenOutcome, ShortenService};
