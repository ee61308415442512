/// A unit of work handed to an execution strategy.
///
/// Strategies run it at most once and never look inside it.
pub type Task = Box<dyn FnOnce() + Send + 'static>;
