mod command_tests;
mod install_tests;
mod statusline_tests;
