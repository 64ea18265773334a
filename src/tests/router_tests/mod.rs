mod pages_tests;
mod schools_api_tests;
