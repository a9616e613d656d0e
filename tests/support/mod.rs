pub mod readers;
pub mod socket_guard;
