use crate::scan_interface::address::RELATED_MIN_LEN;
use crate::scan_interface::{is_related, ScanRecord};
use crate::telemetry::log::LogManager;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One logical access point reconstructed from one or more scan records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessPointGroup {
    /// Normalized address the group was created under; `~<n>` for the n-th
    /// address-less record of the scan.
    pub key: String,
    pub representative: ScanRecord,
    pub channels: BTreeSet<u32>,
    pub variants: Vec<ScanRecord>,
    pub signal_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_id: Option<String>,
    #[serde(skip)]
    ssid_key: String,
}

impl AccessPointGroup {
    fn seed(key: String, record: &ScanRecord, fallback_id: Option<String>) -> Self {
        Self {
            key,
            representative: record.clone(),
            channels: BTreeSet::from([record.channel]),
            variants: vec![record.clone()],
            signal_level: record.signal_level,
            fallback_id,
            ssid_key: record.normalized_ssid(),
        }
    }

    fn absorb(&mut self, record: &ScanRecord) {
        self.channels.insert(record.channel);
        self.signal_level = self.signal_level.max(record.signal_level);
        self.variants.push(record.clone());
    }

    pub fn has_address(&self) -> bool {
        !self.key.starts_with('~')
    }

    pub fn ssid(&self) -> &str {
        &self.representative.ssid
    }

    pub fn normalized_ssid(&self) -> &str {
        &self.ssid_key
    }

    pub fn address(&self) -> &str {
        &self.representative.bssid
    }

    fn holds_slot_of(&self, key: &str, record: &ScanRecord) -> bool {
        self.key == key
            && self.representative.bssid.trim() == record.bssid.trim()
            && self.ssid_key == record.normalized_ssid()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Identifier used for angle placement: address, else SSID, else the
    /// fallback drawn when the group was created.
    pub fn identifier(&self) -> &str {
        let ssid = self.representative.ssid.trim();
        if self.has_address() {
            self.representative.bssid.trim()
        } else if !ssid.is_empty() {
            ssid
        } else {
            self.fallback_id.as_deref().unwrap_or_default()
        }
    }
}

/// Clusters raw scan records into access points in a single ordered pass.
pub struct GroupingEngine {
    rng: StdRng,
    logger: LogManager,
}

impl GroupingEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            logger: LogManager::new("grouping"),
        }
    }

    /// Groups records in input order.
    ///
    /// Addresses shorter than six octets count as malformed and, like absent
    /// ones, always produce a singleton group.
    ///
    /// Related-key search is linear over keys in creation order and the first
    /// related key wins, even if a later key would also match the SSID.
    pub fn group(&mut self, records: &[ScanRecord]) -> Vec<AccessPointGroup> {
        self.regroup(records, &[])
    }

    /// Groups records like [`GroupingEngine::group`], reusing the fallback
    /// identifiers of `previous` address-less groups that hold the same slot,
    /// raw address and SSID, so their angles do not move between scans.
    pub fn regroup(
        &mut self,
        records: &[ScanRecord],
        previous: &[AccessPointGroup],
    ) -> Vec<AccessPointGroup> {
        let ssid_index = ssid_index(records);
        let mut groups: Vec<AccessPointGroup> = Vec::new();
        let mut keys: Vec<(String, usize)> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();
        let mut anonymous = 0usize;

        for record in records {
            let address = record.normalized_address();
            if address.len() < RELATED_MIN_LEN {
                let key = format!("~{}", anonymous);
                anonymous += 1;
                let fallback = previous
                    .iter()
                    .find(|group| group.holds_slot_of(&key, record))
                    .and_then(|group| group.fallback_id.clone())
                    .or_else(|| self.fallback_for(record));
                groups.push(AccessPointGroup::seed(key, record, fallback));
                continue;
            }

            if let Some(&idx) = by_key.get(&address) {
                groups[idx].absorb(record);
                continue;
            }

            let related = keys
                .iter()
                .find(|(key, _)| is_related(key, &address))
                .map(|&(_, idx)| idx);
            match related {
                Some(idx) if groups[idx].normalized_ssid() == record.normalized_ssid() => {
                    groups[idx].absorb(record);
                }
                _ => {
                    let idx = groups.len();
                    groups.push(AccessPointGroup::seed(address.clone(), record, None));
                    keys.push((address.clone(), idx));
                    by_key.insert(address, idx);
                }
            }
        }

        let shared = ssid_index
            .iter()
            .filter(|(ssid, _)| !ssid.is_empty())
            .filter(|(ssid, _)| {
                groups
                    .iter()
                    .filter(|group| group.normalized_ssid() == ssid.as_str())
                    .count()
                    > 1
            })
            .count();
        self.logger.record(&format!(
            "grouped {} records into {} access points ({} SSIDs span several groups)",
            records.len(),
            groups.len(),
            shared
        ));
        groups
    }

    fn fallback_for(&mut self, record: &ScanRecord) -> Option<String> {
        if record.ssid.trim().is_empty() {
            Some(format!("anon-{:08x}", self.rng.gen::<u32>()))
        } else {
            None
        }
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalized SSID to the indices of the records advertising it.
pub fn ssid_index(records: &[ScanRecord]) -> BTreeMap<String, Vec<usize>> {
    let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        index.entry(record.normalized_ssid()).or_default().push(idx);
    }
    index
}
