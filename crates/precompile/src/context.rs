//! Per-call context handed to the router by the host.

use arbos_primitives::{Address, Selector, SLOT_SIZE};
use dashmap::DashMap;
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;

/// A 32-byte storage slot key or value.
pub type Slot = [u8; SLOT_SIZE];

/// Storage access owned by the host. Locking and transaction boundaries are
/// the implementor's business.
pub trait StateAccess: Send + Sync {
    /// Reads a slot; unset slots read as zero.
    fn load(&self, key: &Slot) -> Slot;

    /// Writes a slot.
    fn store(&self, key: Slot, value: Slot);
}

/// Cloneable handle to the host's state, passed to View, Mutate and Payable handlers.
#[derive(Clone)]
pub struct StateHandle(Arc<dyn StateAccess>);

impl StateHandle {
    pub fn new<S>(state: S) -> Self
    where
        S: StateAccess + 'static,
    {
        Self(Arc::new(state))
    }

    pub fn from_arc(state: Arc<dyn StateAccess>) -> Self {
        Self(state)
    }

    pub fn load(&self, key: &Slot) -> Slot {
        self.0.load(key)
    }

    pub fn store(&self, key: Slot, value: Slot) {
        self.0.store(key, value)
    }

    /// Whether both handles point at the same state.
    pub fn ptr_eq(&self, other: &StateHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateHandle(..)")
    }
}

/// In-memory slot storage.
#[derive(Debug, Default)]
pub struct MemoryState {
    slots: DashMap<Slot, Slot>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Number of non-zero slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StateAccess for MemoryState {
    fn load(&self, key: &Slot) -> Slot {
        self.slots.get(key).map(|v| *v).unwrap_or([0u8; SLOT_SIZE])
    }

    fn store(&self, key: Slot, value: Slot) {
        if value == [0u8; SLOT_SIZE] {
            self.slots.remove(&key);
        } else {
            self.slots.insert(key, value);
        }
    }
}

/// The value a handler receives in its caller slot.
///
/// `forwarded` is set when the call arrived through a delegate call or call
/// code; the address is then the outer caller and should not be trusted for
/// authorization by handlers that are not pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller {
    address: Address,
    forwarded: bool,
}

impl Caller {
    pub fn direct(address: Address) -> Self {
        Self {
            address,
            forwarded: false,
        }
    }

    pub fn forwarded(address: Address) -> Self {
        Self {
            address,
            forwarded: true,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_forwarded(&self) -> bool {
        self.forwarded
    }
}

/// Diagnostic hooks the host may attach to a call.
pub trait ExecutionTracer: Send + Sync {
    fn on_enter(&self, _target: Address, _operation: &str, _selector: Selector) {}

    fn on_exit(&self, _target: Address, _operation: &str, _failed: bool) {}
}

/// Everything the host knows about one call.
#[derive(Clone)]
pub struct CallContext {
    /// Address that made the call.
    pub caller: Address,
    /// Address whose storage and identity the call runs as.
    pub acting_as: Address,
    /// Address the call nominally targets, i.e. the precompile's own address.
    pub target: Address,
    /// State handle, absent for pure calls.
    pub state: Option<StateHandle>,
    /// Value sent with the call.
    pub value: BigInt,
    /// Set for static calls.
    pub read_only: bool,
    /// Host tracer, if any.
    pub tracer: Option<Arc<dyn ExecutionTracer>>,
}

impl CallContext {
    /// A direct call from `caller` to the precompile at `target`.
    pub fn new(caller: Address, target: Address) -> Self {
        Self {
            caller,
            acting_as: target,
            target,
            state: None,
            value: BigInt::default(),
            read_only: false,
            tracer: None,
        }
    }

    pub fn with_state(mut self, state: StateHandle) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_value(mut self, value: impl Into<BigInt>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_acting_as(mut self, acting_as: Address) -> Self {
        self.acting_as = acting_as;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn ExecutionTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Whether the call arrived indirectly (delegate call or call code).
    pub fn is_forwarded(&self) -> bool {
        self.acting_as != self.target
    }

    /// The caller as handlers see it, carrying the forwarded flag.
    pub fn caller(&self) -> Caller {
        if self.is_forwarded() {
            Caller::forwarded(self.caller)
        } else {
            Caller::direct(self.caller)
        }
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("caller", &self.caller)
            .field("acting_as", &self.acting_as)
            .field("target", &self.target)
            .field("state", &self.state)
            .field("value", &self.value)
            .field("read_only", &self.read_only)
            .field("tracer", &self.tracer.is_some())
            .finish()
    }
}
