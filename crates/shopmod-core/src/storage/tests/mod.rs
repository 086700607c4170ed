mod yaml_tests;
