pub mod assemble;
pub mod export;
pub mod extract;
pub mod grade;
pub mod history;
pub mod init;
pub mod validate;
