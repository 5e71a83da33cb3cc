pub mod controller;
pub mod detail;
pub mod vendor;

pub use controller::{PointerOutcome, PointerSample, SelectionController, POINTER_GUARD_MS};
pub use detail::{signal_quality, BandClass, DetailView, VariantLine};
pub use vendor::VendorTable;
