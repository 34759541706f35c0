mod docgen_tests;
mod error_tests;
mod exec_tests;
mod path_tests;
