mod ab_test_results;
mod customers;
mod engagements;
mod experiments;
mod movies;
mod segments;
mod subscriptions;
