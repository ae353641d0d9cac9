pub mod apcaccess;
pub mod cli;
pub mod load;
pub mod plugin;
pub mod status;
pub mod units;

pub use apcaccess::{run_status_tool, InvocationError, DEFAULT_APCACCESS_PATH};
pub use load::calc_load_watts;
pub use status::{parse_status, StatusError, StatusTable};
