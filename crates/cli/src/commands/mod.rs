mod config;
mod copy;
mod delete;
mod health;
mod inspect;
mod list;
mod prepare;
mod show;
mod upload;
mod usage;

pub use config::ConfigArgs;
pub use config::handle_config;
pub use copy::CopyArgs;
pub use copy::handle_copy;
pub use delete::DeleteArgs;
pub use delete::handle_delete;
pub use health::HealthArgs;
pub use health::handle_health;
pub use inspect::InspectArgs;
pub use inspect::handle_inspect;
pub use list::ListArgs;
pub use list::handle_list;
pub use prepare::PrepareArgs;
pub use prepare::handle_prepare;
pub use show::ShowArgs;
pub use show::handle_show;
pub use upload::UploadArgs;
pub use upload::handle_upload;
pub use usage::UsageArgs;
pub use usage::handle_usage;
