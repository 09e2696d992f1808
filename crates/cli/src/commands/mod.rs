pub mod config_cmd;
pub mod doctor;
pub mod explain;
pub mod onboard;
