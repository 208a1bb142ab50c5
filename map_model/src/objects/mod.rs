pub mod boundary;
pub mod crosswalk;
pub mod lane;
pub mod traffic_signals;
