mod create;
mod init;
mod lifecycle;
mod list;

pub use create::cmd_create_advisor;
pub use init::cmd_init;
pub use lifecycle::{cmd_activate, cmd_renew, cmd_revoke, cmd_suspend};
pub use list::{cmd_list_advisors, cmd_show_advisor};
