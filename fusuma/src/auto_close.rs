/// Remembers the last activated app that should quit once it loses focus
/// with no windows left.
#[derive(Debug)]
pub struct AutoClose<A> {
    bundle_ids: Vec<String>,
    pending: Option<A>,
}

impl<A> AutoClose<A> {
    pub fn new(bundle_ids: Vec<String>) -> Self {
        Self {
            bundle_ids,
            pending: None,
        }
    }

    pub fn watches(&self, bundle_id: &str) -> bool {
        self.bundle_ids.iter().any(|id| id == bundle_id)
    }

    /// Record `app` as the newly active app and hand back the previous
    /// candidate, if any. The slot is always emptied first.
    pub fn activated(&mut self, app: A, bundle_id: Option<&str>) -> Option<A> {
        let previous = self.pending.take();
        if bundle_id.is_some_and(|id| self.watches(id)) {
            self.pending = Some(app);
        }
        previous
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&A> {
        self.pending.as_ref()
    }
}
