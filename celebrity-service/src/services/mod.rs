pub mod analysis;
pub mod providers;

pub use analysis::{build_parts, encode_image};
pub use providers::{Part, ProviderError, VisionProvider};
