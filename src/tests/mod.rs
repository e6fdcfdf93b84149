mod mapping_invariants_tests;
mod user_dictionary_tests;
