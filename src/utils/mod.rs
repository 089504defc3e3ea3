pub(crate) mod logging;
pub(crate) mod path;

pub(crate) use logging::init_tracing;
pub(crate) use path::expand_home;
