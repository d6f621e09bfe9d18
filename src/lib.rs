pub mod omp_frontend;
pub mod projects;

pub use omp_frontend::Flag;
pub use projects::cli::start_cli;
