pub mod compare;
pub mod init;
pub mod package;
