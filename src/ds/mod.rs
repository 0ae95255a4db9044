pub mod queue;
pub mod stack;

pub use queue::BoundedQueue;
pub use stack::BoundedStack;
