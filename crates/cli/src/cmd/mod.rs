mod generate;
mod list;
mod targets;

pub use generate::cmd_generate;
pub use list::cmd_list;
pub use targets::cmd_targets;
