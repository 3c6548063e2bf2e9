pub mod auth;
pub mod folders;
pub mod imports;
pub mod issues;
pub mod projects;
pub mod screenshots;
pub mod scripts;
pub mod test_lab;
