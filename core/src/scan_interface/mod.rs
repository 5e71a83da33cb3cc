pub mod address;
pub mod record;

pub use address::{is_related, normalize_address, oui_prefix};
pub use record::{parse_scan_json, records_from_value, ScanRecord, WEAK_SIGNAL_DBM};
