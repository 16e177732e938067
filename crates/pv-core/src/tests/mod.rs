mod field_accessor;
mod property_tests;
mod user_id;
