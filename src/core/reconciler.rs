use crate::domain::model::remote_join;
use crate::domain::ports::RemoteStore;
use regex::Regex;
use std::sync::Arc;

/// Pattern of the suffix the store appends on a name collision, e.g.
/// `A (1).pkg` next to `A.pkg`.
const DUPLICATE_MARKER: &str = r"\(\d+\)";

/// Prunes renamed duplicates under the destination root. Transfers are
/// idempotent by existence check but the job start is not atomically guarded,
/// so a restart can re-dispatch a job whose predecessor already landed; this
/// is the convergence mechanism that removes the resulting collision copies.
pub struct DuplicateReconciler<S: RemoteStore> {
    store: Arc<S>,
    marker: Regex,
}

impl<S: RemoteStore> DuplicateReconciler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            marker: Regex::new(DUPLICATE_MARKER).expect("duplicate marker pattern is valid"),
        }
    }

    /// Delete every marked object directly under `dest_root`; returns the
    /// number deleted. The listing is always re-fetched. Never fails the
    /// run: listing or deletion failures are logged and skipped.
    pub async fn prune(&self, dest_root: &str) -> usize {
        let names = match self.store.list_children(dest_root).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Could not list {} for reconciliation: {}", dest_root, e);
                return 0;
            }
        };

        let mut deleted = 0;
        for name in names.iter().filter(|n| self.marker.is_match(n)) {
            tracing::info!("Deleting duplicate: {}", name);
            match self.store.delete(&remote_join(dest_root, name)).await {
                Ok(()) => deleted += 1,
                Err(e) => tracing::warn!("Failed to delete duplicate {}: {}", name, e),
            }
        }
        deleted
    }
}
