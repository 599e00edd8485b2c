//! Routines: handlers and cost estimators with statically derived signatures.
//!
//! Any `Fn(&C, A1, .., An) -> R` with up to eleven arguments is a routine over
//! the receiver type `C`: eight declared parameters behind the three context
//! slots of a payable handler. This holds provided every `Ai` is a [`Param`] and `R` is a
//! [`Returns`]. The receiver always occupies slot 0 of the signature.

use crate::abi::{AbiValue, Returned, Returns};
use crate::context::{Caller, StateHandle};
use arbos_primitives::{SemanticType, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// One runtime argument, either injected context or a declared value.
#[derive(Debug, Clone)]
pub enum Argument {
    Caller(Caller),
    State(StateHandle),
    Value(Value),
}

impl Argument {
    /// The slot type this argument fills.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Argument::Caller(_) => SemanticType::Address,
            Argument::State(_) => SemanticType::State,
            Argument::Value(value) => value.semantic_type(),
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

/// A Rust type usable as a routine parameter.
pub trait Param: Sized {
    fn semantic_type() -> SemanticType;

    fn from_argument(argument: Argument) -> Option<Self>;
}

impl<T: AbiValue> Param for T {
    fn semantic_type() -> SemanticType {
        <T as AbiValue>::semantic_type()
    }

    fn from_argument(argument: Argument) -> Option<Self> {
        match argument {
            Argument::Value(value) => T::from_value(value),
            Argument::Caller(caller) => T::from_value(Value::Address(caller.address())),
            Argument::State(_) => None,
        }
    }
}

impl Param for Caller {
    fn semantic_type() -> SemanticType {
        SemanticType::Address
    }

    fn from_argument(argument: Argument) -> Option<Self> {
        match argument {
            Argument::Caller(caller) => Some(caller),
            Argument::Value(Value::Address(address)) => Some(Caller::direct(address)),
            _ => None,
        }
    }
}

impl Param for StateHandle {
    fn semantic_type() -> SemanticType {
        SemanticType::State
    }

    fn from_argument(argument: Argument) -> Option<Self> {
        match argument {
            Argument::State(state) => Some(state),
            _ => None,
        }
    }
}

/// Arguments a routine could not accept. Indices exclude the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentFault {
    Count {
        expected: usize,
        actual: usize,
    },
    Type {
        index: usize,
        expected: SemanticType,
        actual: SemanticType,
    },
}

/// Implemented for every function shape that can serve as a routine over `C`.
/// `Args` is the tuple of parameter types and only exists to keep the
/// per-arity implementations apart.
pub trait RoutineFn<C, Args>: Send + Sync + 'static {
    /// Full parameter list, receiver first.
    fn inputs() -> Vec<SemanticType>;

    fn outputs() -> Vec<SemanticType>;

    fn invoke(&self, receiver: &C, arguments: Vec<Argument>) -> Result<Returned, ArgumentFault>;
}

fn extract<T: Param>(
    index: usize,
    argument: Option<Argument>,
    expected: usize,
    supplied: usize,
) -> Result<T, ArgumentFault> {
    let argument = argument.ok_or(ArgumentFault::Count {
        expected,
        actual: supplied,
    })?;
    let actual = argument.semantic_type();
    T::from_argument(argument).ok_or_else(|| ArgumentFault::Type {
        index,
        expected: T::semantic_type(),
        actual,
    })
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_routine_fn {
    ($($ty:ident $var:ident),*) => {
        impl<C, F, R, $($ty,)*> RoutineFn<C, ($($ty,)*)> for F
        where
            F: Fn(&C, $($ty),*) -> R + Send + Sync + 'static,
            R: Returns,
            $($ty: Param,)*
        {
            fn inputs() -> Vec<SemanticType> {
                vec![SemanticType::Receiver, $(<$ty as Param>::semantic_type()),*]
            }

            fn outputs() -> Vec<SemanticType> {
                R::types()
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn invoke(
                &self,
                receiver: &C,
                arguments: Vec<Argument>,
            ) -> Result<Returned, ArgumentFault> {
                let expected = count!($($ty)*);
                let supplied = arguments.len();
                if supplied != expected {
                    return Err(ArgumentFault::Count {
                        expected,
                        actual: supplied,
                    });
                }
                let mut arguments = arguments.into_iter();
                let mut index = 0usize;
                $(
                    let $var = extract::<$ty>(index, arguments.next(), expected, supplied)?;
                    index += 1;
                )*
                Ok(self(receiver, $($var),*).into_returned())
            }
        }
    };
}

impl_routine_fn!();
impl_routine_fn!(A1 a1);
impl_routine_fn!(A1 a1, A2 a2);
impl_routine_fn!(A1 a1, A2 a2, A3 a3);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9);
impl_routine_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9, A10 a10);
impl_routine_fn!(
    A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9, A10 a10, A11 a11
);

trait ErasedRoutine<C>: Send + Sync {
    fn invoke(&self, receiver: &C, arguments: Vec<Argument>) -> Result<Returned, ArgumentFault>;
}

struct Typed<F, Args> {
    f: F,
    _args: PhantomData<fn() -> Args>,
}

impl<C, F, Args> ErasedRoutine<C> for Typed<F, Args>
where
    F: RoutineFn<C, Args>,
{
    fn invoke(&self, receiver: &C, arguments: Vec<Argument>) -> Result<Returned, ArgumentFault> {
        <F as RoutineFn<C, Args>>::invoke(&self.f, receiver, arguments)
    }
}

/// A named routine over receiver type `C`, with its signature.
pub struct Routine<C> {
    name: String,
    inputs: Vec<SemanticType>,
    outputs: Vec<SemanticType>,
    inner: Arc<dyn ErasedRoutine<C>>,
}

impl<C: 'static> Routine<C> {
    pub fn new<F, Args>(name: impl Into<String>, f: F) -> Self
    where
        F: RoutineFn<C, Args>,
        Args: 'static,
    {
        Self {
            name: name.into(),
            inputs: <F as RoutineFn<C, Args>>::inputs(),
            outputs: <F as RoutineFn<C, Args>>::outputs(),
            inner: Arc::new(Typed {
                f,
                _args: PhantomData,
            }),
        }
    }

    /// Binds the routine to a receiver, erasing `C`.
    pub fn bind(&self, receiver: Arc<C>) -> BoundRoutine
    where
        C: Send + Sync,
    {
        let inner = Arc::clone(&self.inner);
        BoundRoutine {
            name: self.name.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            invoke: Arc::new(move |arguments: Vec<Argument>| inner.invoke(&receiver, arguments)),
        }
    }
}

impl<C> Routine<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types, receiver first.
    pub fn inputs(&self) -> &[SemanticType] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[SemanticType] {
        &self.outputs
    }
}

impl<C> Clone for Routine<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for Routine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish()
    }
}

type BoundCall = dyn Fn(Vec<Argument>) -> Result<Returned, ArgumentFault> + Send + Sync;

/// A routine closed over its receiver. Two bound routines are equal when
/// their names and signatures are.
#[derive(Clone)]
pub struct BoundRoutine {
    name: String,
    inputs: Vec<SemanticType>,
    outputs: Vec<SemanticType>,
    invoke: Arc<BoundCall>,
}

impl BoundRoutine {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types, receiver first.
    pub fn inputs(&self) -> &[SemanticType] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[SemanticType] {
        &self.outputs
    }

    /// Invokes the routine. `arguments` excludes the receiver.
    pub fn call(&self, arguments: Vec<Argument>) -> Result<Returned, ArgumentFault> {
        (self.invoke)(arguments)
    }
}

impl PartialEq for BoundRoutine {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.inputs == other.inputs && self.outputs == other.outputs
    }
}

impl Eq for BoundRoutine {}

impl fmt::Debug for BoundRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundRoutine")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish()
    }
}
