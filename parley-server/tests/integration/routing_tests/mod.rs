pub mod test_queued_candidates;
