mod common;

mod smarty_tests;
