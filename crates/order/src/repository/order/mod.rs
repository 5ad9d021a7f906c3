mod command;
mod memory;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::memory::InMemoryOrderRepository;
pub use self::query::OrderQueryRepository;
