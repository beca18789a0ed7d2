pub mod cli;
pub mod description_file;
