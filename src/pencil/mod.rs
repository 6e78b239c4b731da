pub(crate) mod coordinator;
