pub mod sample_queries;
