use std::sync::atomic::{AtomicBool, Ordering};

/// One-time onboarding flag. The backing preference store is an external
/// collaborator; this is the whole contract it has to honor.
pub trait OnboardingService: Send + Sync {
    fn has_seen_onboarding(&self) -> bool;
    fn mark_onboarding_seen(&self);
}

/// Process-local implementation, defaulting to "not seen".
#[derive(Debug, Default)]
pub struct MemoryOnboardingService {
    seen: AtomicBool,
}

impl MemoryOnboardingService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OnboardingService for MemoryOnboardingService {
    fn has_seen_onboarding(&self) -> bool {
        self.seen.load(Ordering::Relaxed)
    }

    fn mark_onboarding_seen(&self) {
        self.seen.store(true, Ordering::Relaxed);
    }
}
