use crate::backend::PackageBackend;
use crate::{AptBackend, BrewBackend, DnfBackend, PacmanBackend};

/// Process-wide backend registry. Populated once at startup from the
/// fixed adapter set; lookup is case-insensitive. Registering two
/// backends under the same name is a startup-time fatal condition, not
/// something to discover at lookup time.
pub struct BackendRegistry {
    backends: Vec<Box<dyn PackageBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// All built-in adapters, in a stable order.
    pub fn with_default_backends() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DnfBackend));
        registry.register(Box::new(PacmanBackend));
        registry.register(Box::new(AptBackend));
        registry.register(Box::new(BrewBackend));
        registry
    }

    /// Register one backend.
    ///
    /// # Panics
    /// Panics on a duplicate name (case-insensitive): two adapters
    /// claiming one manager is a programming error that must surface
    /// at startup, not as ambiguous lookups later.
    pub fn register(&mut self, backend: Box<dyn PackageBackend>) {
        let name = backend.name();
        if self.get(name).is_some() {
            panic!("duplicate backend registration: {}", name);
        }
        self.backends.push(backend);
    }

    pub fn get(&self, name: &str) -> Option<&dyn PackageBackend> {
        self.backends
            .iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
            .map(|b| b.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PackageBackend> {
        self.backends.iter().map(|b| b.as_ref())
    }

    /// Backends whose package manager is actually present on this host.
    pub fn available(&self) -> Vec<&dyn PackageBackend> {
        self.iter().filter(|b| b.is_available()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_default_backends()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_all_backends() {
        let registry = BackendRegistry::with_default_backends();
        assert_eq!(registry.len(), 4);
        for name in ["dnf", "pacman", "apt", "brew"] {
            assert!(registry.get(name).is_some(), "missing backend {}", name);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = BackendRegistry::with_default_backends();
        assert!(registry.get("DNF").is_some());
        assert!(registry.get("Pacman").is_some());
        assert!(registry.get("zypper").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate backend registration")]
    fn test_duplicate_registration_is_fatal() {
        let mut registry = BackendRegistry::with_default_backends();
        registry.register(Box::new(DnfBackend));
    }
}
