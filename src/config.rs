pub(crate) mod assets;
pub(crate) mod brand;
pub(crate) mod content;
pub(crate) mod timing;
