pub(crate) mod l1_client;
pub(crate) mod l2_client;
