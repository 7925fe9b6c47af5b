//! Extension point for calls to functions the program does not define
//!
//! Built-in or native functions are supplied by the embedder through an
//! [`Interceptor`]. The interpreter consults it only after the program's own
//! function table misses; a decline is reported as `UnknownFunction`.

use crate::value::Value;

/// Outcome of offering a call to an interceptor
#[derive(Debug, Clone, PartialEq)]
pub enum Interception {
    /// The call was handled and produced this value
    Handled(Value),
    /// The interceptor does not know this function
    Declined,
}

pub trait Interceptor {
    fn intercept(&mut self, name: &str, args: &[Value]) -> Interception;
}

impl<F> Interceptor for F
where
    F: FnMut(&str, &[Value]) -> Interception,
{
    fn intercept(&mut self, name: &str, args: &[Value]) -> Interception {
        self(name, args)
    }
}

/// Dispatches to the first interceptor that handles the call
#[derive(Default)]
pub struct InterceptorChain {
    links: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.links.push(Box::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Interceptor for InterceptorChain {
    fn intercept(&mut self, name: &str, args: &[Value]) -> Interception {
        for link in &mut self.links {
            if let Interception::Handled(value) = link.intercept(name, args) {
                return Interception::Handled(value);
            }
        }
        Interception::Declined
    }
}
