pub mod memory;
pub mod order;
pub mod user;

pub use memory::InMemoryOrderRepository;
pub use memory::InMemoryUserRepository;
pub use order::PostgresOrderRepository;
pub use user::PostgresUserRepository;
