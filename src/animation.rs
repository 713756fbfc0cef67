pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod motion;
pub(crate) mod particles;
pub(crate) mod spring;
