pub mod check_environment;
pub mod cli;
pub mod run;
pub mod run_generate_batch;
pub mod run_preview;
pub mod run_send_batch;
pub mod run_single_send;
pub mod run_website_batch;
