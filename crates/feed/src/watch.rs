/// Last-write-wins guard for superseded feed requests.
///
/// The send flow fires a fresh fetch on every relevant change. Rapid
/// re-triggering can land responses out of order; only the result of
/// the most recently issued request may be applied. Single-threaded by
/// design, like the rest of the flow, so a plain counter suffices.
#[derive(Debug, Default)]
pub struct RequestWatch {
    latest: u64,
}

impl RequestWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new in-flight request; returns its generation token.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// True if a response for `generation` is still current and may be
    /// applied. Stale responses are dropped by the caller.
    pub fn accept(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_request_wins() {
        let mut watch = RequestWatch::new();
        let first = watch.issue();
        let second = watch.issue();
        assert!(!watch.accept(first), "superseded response must be dropped");
        assert!(watch.accept(second));
    }

    #[test]
    fn stale_generation_stays_stale_after_more_issues() {
        let mut watch = RequestWatch::new();
        let g1 = watch.issue();
        watch.issue();
        watch.issue();
        assert!(!watch.accept(g1));
    }
}
