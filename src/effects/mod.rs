pub(crate) mod composite;
pub(crate) mod motion;
pub(crate) mod transitions;
