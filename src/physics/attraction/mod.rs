pub mod center_pull;
