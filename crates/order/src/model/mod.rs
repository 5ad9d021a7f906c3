mod order;

pub use self::order::{Order, OrderStatus, UnknownStatus};
