pub(crate) mod block;
pub(crate) mod contest;
pub(crate) mod proposal;
pub(crate) mod tier;
pub(crate) mod transition;
