//! Candidate implementations: a receiver and the routines registered on it.

use crate::routine::{Routine, RoutineFn};
use hashbrown::HashMap;
use std::sync::Arc;
use tracing::warn;

/// A native implementation offered for an interface.
///
/// Routines are registered explicitly by name. The verifier looks up the
/// handler `Name` and the estimator `NameGasCost` for every declared
/// operation `name`.
///
/// ```rust
/// use arbos_precompile::{Candidate, Caller, HandlerError};
/// use num_bigint::BigInt;
///
/// struct Echo;
///
/// let candidate = Candidate::new("Echo", Echo)
///     .routine("Echo", |_: &Echo, _caller: Caller, x: i32| -> Result<i32, HandlerError> { Ok(x) })
///     .routine("EchoGasCost", |_: &Echo, _x: i32| BigInt::from(0));
/// assert_eq!(candidate.len(), 2);
/// ```
pub struct Candidate<C> {
    name: String,
    receiver: Arc<C>,
    routines: HashMap<String, Routine<C>>,
}

impl<C: Send + Sync + 'static> Candidate<C> {
    pub fn new(name: impl Into<String>, receiver: C) -> Self {
        Self::from_arc(name, Arc::new(receiver))
    }

    /// Wraps a receiver that is already shared.
    pub fn from_arc(name: impl Into<String>, receiver: Arc<C>) -> Self {
        Self {
            name: name.into(),
            receiver,
            routines: HashMap::new(),
        }
    }

    /// Registers `f` under `name`, replacing any routine of that name.
    pub fn routine<F, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: RoutineFn<C, Args>,
        Args: 'static,
    {
        self.insert(Routine::new(name, f));
        self
    }

    /// Adds a prepared routine, returning the one it replaced.
    pub fn insert(&mut self, routine: Routine<C>) -> Option<Routine<C>> {
        let replaced = self.routines.insert(routine.name().to_string(), routine);
        if let Some(old) = &replaced {
            warn!(candidate = %self.name, routine = %old.name(), "routine registered twice");
        }
        replaced
    }
}

impl<C> Candidate<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> &Arc<C> {
        &self.receiver
    }

    pub fn get(&self, name: &str) -> Option<&Routine<C>> {
        self.routines.get(name)
    }

    /// Registered routine names, sorted.
    pub fn routine_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Caller;
    use crate::error::HandlerError;
    use arbos_primitives::SemanticType;

    struct Pinger;

    impl Pinger {
        fn ping(&self, _caller: Caller) -> Result<bool, HandlerError> {
            Ok(true)
        }
    }

    #[test]
    fn routines_are_found_by_exact_name() {
        let candidate = Candidate::new("Pinger", Pinger).routine("Ping", Pinger::ping);
        assert!(candidate.get("Ping").is_some());
        assert!(candidate.get("ping").is_none());
        assert_eq!(candidate.routine_names(), vec!["Ping"]);
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let candidate = Candidate::new("Pinger", Pinger)
            .routine("Ping", Pinger::ping)
            .routine("Ping", |_: &Pinger| -> Result<(), HandlerError> { Ok(()) });
        assert_eq!(candidate.len(), 1);
        assert_eq!(
            candidate.get("Ping").map(|r| r.inputs().to_vec()),
            Some(vec![SemanticType::Receiver])
        );
    }
}
