//! Database adapters.

pub mod memory;
pub mod mysql_shell;

pub use memory::MemoryDatabase;
pub use mysql_shell::MysqlShell;
