use serde::{Deserialize, Serialize};

/// Link sentinels the catalog uses for "no usable source URL".
pub const LINK_MISSING: &str = "MISSING";
pub const LINK_CART_ONLY: &str = "CART ONLY";

const DEMO_MARKER: &str = "(demo)";

/// One parsed catalog row. Immutable after construction; lives for exactly
/// one dispatch cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub region: String,
    pub content_id: String,
    pub direct_link: String,
    pub is_demo: bool,
    pub destination_path: String,
}

impl CatalogEntry {
    pub fn new(
        name: String,
        region: String,
        content_id: String,
        direct_link: String,
        dest_root: &str,
    ) -> Self {
        let is_demo = name.to_lowercase().contains(DEMO_MARKER);
        let destination_path = remote_join(dest_root, &format!("{}.pkg", content_id));
        Self {
            name,
            region,
            content_id,
            direct_link,
            is_demo,
            destination_path,
        }
    }

    /// True only when the link is none of the sentinels. All three must be
    /// absent; a historical variant ORed the negations and was always true.
    pub fn has_usable_link(&self) -> bool {
        self.direct_link != LINK_MISSING
            && self.direct_link != LINK_CART_ONLY
            && !self.direct_link.is_empty()
    }

    /// Display title used in console and log lines.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.region)
    }
}

/// Join a destination root and a leaf name with exactly one separator.
pub fn remote_join(root: &str, leaf: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), leaf)
}

/// Opaque token identifying an in-flight copy-by-URL job on the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Complete,
    Failed,
}

/// Outcome of an existence probe. `RateLimited` and `Transient` collapse to
/// "not present" at the oracle boundary but must stay distinct here so the
/// cooldown applies only to the rate-limit case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOutcome {
    Found,
    NotFound,
    RateLimited,
    Transient,
}

/// Why an entry was skipped. Reporting only; no effect on control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyPresent,
    NoUsableLink,
    Demo,
    DispatchRefused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Completed,
    Skipped(SkipReason),
    Kicked,
}

/// Per-run counters, printed as the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub transferred: usize,
    pub skipped_present: usize,
    pub skipped_no_link: usize,
    pub skipped_demo: usize,
    pub skipped_refused: usize,
    pub kicked: bool,
}

impl RunReport {
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::AlreadyPresent => self.skipped_present += 1,
            SkipReason::NoUsableLink => self.skipped_no_link += 1,
            SkipReason::Demo => self.skipped_demo += 1,
            SkipReason::DispatchRefused => self.skipped_refused += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_present + self.skipped_no_link + self.skipped_demo + self.skipped_refused
    }
}
